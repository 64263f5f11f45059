//! Per-document normalization pipeline.
//!
//! Stages run strictly forward over one document's table; rows keep their
//! source order throughout (the forward fill and identifier stages depend on
//! it). The whole pass is total: extraction failures happen before this
//! point, and every value-level problem degrades to null.

use tracing::debug;

use bulletin_model::{BulletinMetadata, CanonicalRow, RawTable};

use crate::routing::RoutingOptions;
use crate::{align, backfill, coerce, headers, identity, routing, structural};

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub routing: RoutingOptions,
}

/// Runs a raw grid through header canonicalization, structural cleanup,
/// backfill, routing, coercion, identity and final alignment.
pub fn normalize_document(
    raw: &RawTable,
    meta: &BulletinMetadata,
    options: NormalizeOptions,
) -> Vec<CanonicalRow> {
    let mut table = headers::build_table(raw);
    let rows_in = table.height();

    let header_rows_stripped = structural::strip_leading_header_rows(&mut table);
    structural::retain_numeric_serials(&mut table);
    align::ensure_expected_columns(&mut table);
    backfill::backfill_levels(&mut table);
    routing::route_water_levels(&mut table, meta.session, options.routing);
    coerce::apply_type_coercion(&mut table);
    identity::forward_fill_river(&mut table);
    identity::assign_identity(&mut table, meta);
    let rows = align::align_rows(&table);

    debug!(
        source_file = %meta.source_file,
        session = %meta.session,
        bulletin_date = %meta.bulletin_date,
        rows_in,
        header_rows_stripped,
        rows_out = rows.len(),
        "document normalized"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulletin_model::Session;

    fn raw(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
    }

    fn evening_meta() -> BulletinMetadata {
        BulletinMetadata {
            source_file: "Bulletin_Evening_25.08.2024_03.csv".to_string(),
            bulletin_date: "25.08.2024".to_string(),
            session: Session::Evening,
        }
    }

    #[test]
    fn evening_bulletin_with_ambiguous_water_level() {
        let raw = raw(&[
            &["Sl No", "River", "Station", "District", "Water Level (m)", "Trend"],
            &["1", "Ganga", "Patna", "Patna", "10.2", "Rising"],
            &["2", "", "Bhagalpur", "Bhagalpur", "11.4", "Falling"],
        ]);
        let rows = normalize_document(&raw, &evening_meta(), NormalizeOptions::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unique_id, "1_25.08.2024_Evening");
        assert_eq!(rows[1].unique_id, "2_25.08.2024_Evening");
        assert_eq!(rows[0].water_level_1800hrs_m, Some(10.2));
        assert_eq!(rows[1].water_level_1800hrs_m, Some(11.4));
        assert_eq!(rows[0].water_level_0800hrs_m, None);
        assert_eq!(rows[1].water_level_0800hrs_m, None);
        assert_eq!(rows[1].river.as_deref(), Some("Ganga"));
        assert_eq!(rows[0].trend.as_deref(), Some("Rising"));
        assert_eq!(
            rows[0].source_file,
            "Bulletin_Evening_25.08.2024_03.csv"
        );
    }

    #[test]
    fn identifiers_are_pairwise_distinct() {
        let raw = raw(&[
            &["Sl No", "Station", "District"],
            &["1", "Patna", "Patna"],
            &["2", "Gaya", "Gaya"],
            &["3", "Buxar", "Buxar"],
        ]);
        let rows = normalize_document(&raw, &evening_meta(), NormalizeOptions::default());
        let mut ids: Vec<&str> = rows.iter().map(|row| row.unique_id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn forecast_triple_and_unit_rows() {
        let raw = raw(&[
            &[
                "Sl No",
                "Station",
                "District",
                "Warning Level (m)",
                "Forecast",
                "",
                "",
            ],
            &["", "", "", "(m)", "Level", "Time", "Date"],
            &["1", "Patna", "Patna", "48.6", "49.1", "08.00", "26.08.2024"],
        ]);
        let rows = normalize_document(&raw, &evening_meta(), NormalizeOptions::default());

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.warning_level_m, Some(48.6));
        assert_eq!(row.forecast_waterlevel_m, Some(49.1));
        assert_eq!(
            row.forecast_time,
            chrono::NaiveTime::from_hms_opt(8, 0, 0)
        );
        assert_eq!(
            row.forecast_date,
            chrono::NaiveDate::from_ymd_opt(2024, 8, 26)
        );
    }

    #[test]
    fn noise_rows_consume_ordinals_but_are_dropped() {
        let raw = raw(&[
            &["Station", "District"],
            &["Patna", "Patna"],
            &["", ""],
            &["Gaya", "Gaya"],
        ]);
        let rows = normalize_document(&raw, &evening_meta(), NormalizeOptions::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unique_id, "1_25.08.2024_Evening");
        assert_eq!(rows[1].unique_id, "3_25.08.2024_Evening");
    }

    #[test]
    fn empty_grid_yields_no_rows() {
        let rows = normalize_document(
            &RawTable::default(),
            &evening_meta(),
            NormalizeOptions::default(),
        );
        assert!(rows.is_empty());
    }
}
