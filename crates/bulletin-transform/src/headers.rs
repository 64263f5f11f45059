//! Header canonicalization.
//!
//! Raw bulletins spell the same column a dozen ways ("Warning Level (m)",
//! "Warning_Level__AMZ", ...). Labels are normalized textually, a compound
//! "Forecast" header spanning three physical columns is expanded into the
//! forecast triple, and a static lookup maps the known variants onto the
//! canonical field names. Unmapped labels pass through verbatim; later
//! stages ignore columns they do not know.

use bulletin_model::schema::{
    DANGER_LEVEL_M, DISTRICT, FC_NO, FORECAST_DATE, FORECAST_TIME, FORECAST_WATERLEVEL_M, HFL_M,
    RAINFALL_MM, REMARKS, RIVER, SL_NO, STATION, TREND, TREND_01, WARNING_LEVEL_M,
    WATER_LEVEL_0800, WATER_LEVEL_1800,
};
use bulletin_model::{CANONICAL_FIELDS, RawTable, Table};

/// Normalized form of the compound header that spans the forecast triple.
const FORECAST_COMPOUND: &str = "forecast";

/// Lowercases a raw label and collapses whitespace and punctuation runs into
/// single underscores.
pub fn normalize_label(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut collapsed = String::with_capacity(lowered.len());
    let mut gap = false;
    for ch in lowered.chars() {
        if ch.is_alphanumeric() {
            if gap && !collapsed.is_empty() {
                collapsed.push('_');
            }
            collapsed.push(ch);
            gap = false;
        } else {
            gap = true;
        }
    }
    collapsed
}

/// Exact-match table for the known label variants, keyed by normalized text.
fn lookup(normalized: &str) -> Option<&'static str> {
    let mapped = match normalized {
        "sl_no" | "slno" => SL_NO,
        "station" => STATION,
        "district" => DISTRICT,
        "river" => RIVER,

        "warning_level_m" | "warning_level_amz" => WARNING_LEVEL_M,
        "danger_level_m" | "danger_level_amz" => DANGER_LEVEL_M,
        "hfl_m" | "h_f_l_m" | "h_f_l_amz" => HFL_M,

        "water_level_at_0800_hrs_m" | "water_level_0800_hrs_m" | "water_level_0800hrs_m" => {
            WATER_LEVEL_0800
        }
        "water_level_at_1800_hrs_m" | "water_level_1800_hrs_m" | "water_level_1800hrs_m" => {
            WATER_LEVEL_1800
        }

        "trend" => TREND,
        "trend_01" => TREND_01,

        "forecast" => FORECAST_COMPOUND,
        "forecast_water_level_m" | "forecast_waterlevel_m" => FORECAST_WATERLEVEL_M,
        "forecast_time" => FORECAST_TIME,
        "forecast_date" => FORECAST_DATE,

        "fc_no" | "f_c_no" => FC_NO,

        "remarks" => REMARKS,
        _ => return None,
    };
    Some(mapped)
}

/// Maps one raw label to its canonical name. The rainfall substring override
/// runs before the exact-match table so precedence stays deterministic.
pub fn canonical_label(raw: &str) -> String {
    let normalized = normalize_label(raw);
    if normalized.contains("rainfall") {
        return RAINFALL_MM.to_string();
    }
    match lookup(&normalized) {
        Some(mapped) => mapped.to_string(),
        None => normalized,
    }
}

/// Expands a compound "forecast" label into the forecast triple, consuming
/// the two labels that follow it. Applies only when at least two more labels
/// exist to consume.
pub fn expand_forecast(labels: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(labels.len());
    let mut i = 0;
    while i < labels.len() {
        if normalize_label(&labels[i]) == FORECAST_COMPOUND && i + 2 < labels.len() {
            out.push(FORECAST_WATERLEVEL_M.to_string());
            out.push(FORECAST_TIME.to_string());
            out.push(FORECAST_DATE.to_string());
            i += 3;
        } else {
            out.push(labels[i].clone());
            i += 1;
        }
    }
    out
}

/// Full header pass: forecast expansion, canonicalization, and duplicate
/// "trend" disambiguation (first stays trend, later ones become trend_01).
pub fn finalize_headers(raw: &[String]) -> Vec<String> {
    let expanded = expand_forecast(raw);
    let mut seen_trend = 0usize;
    let mut finalized = Vec::with_capacity(expanded.len());
    for label in &expanded {
        let canonical = canonical_label(label);
        if canonical == TREND {
            finalized.push(if seen_trend == 0 {
                TREND.to_string()
            } else {
                TREND_01.to_string()
            });
            seen_trend += 1;
        } else {
            finalized.push(canonical);
        }
    }
    finalized
}

/// True when a raw row reads as a header: at least one cell canonicalizes to
/// a known field name or to the compound forecast label.
pub fn is_header_row(row: &[String]) -> bool {
    row.iter().any(|cell| {
        let canonical = canonical_label(cell);
        canonical == FORECAST_COMPOUND || CANONICAL_FIELDS.contains(&canonical.as_str())
    })
}

/// Builds the working table from a raw grid. A true first-row header is
/// promoted and dropped from the data; otherwise positional labels are
/// synthesized so every data row survives.
pub fn build_table(raw: &RawTable) -> Table {
    if raw.rows.is_empty() {
        return Table::new(Vec::new());
    }
    let (labels, data_start) = if is_header_row(&raw.rows[0]) {
        (raw.rows[0].clone(), 1)
    } else {
        let width = raw.rows.iter().map(Vec::len).max().unwrap_or(0);
        ((0..width).map(|i| i.to_string()).collect(), 0)
    };
    let columns = finalize_headers(&labels);
    Table::from_raw_rows(columns, &raw.rows[data_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|label| (*label).to_string()).collect()
    }

    #[test]
    fn variants_map_to_the_same_field() {
        for raw in ["Warning Level (m)", "Warning_Level__AMZ", "warning_level_m"] {
            assert_eq!(canonical_label(raw), WARNING_LEVEL_M, "variant: {raw}");
        }
        for raw in ["H.F.L. (m)", "HFL_m", "h_f_l_amz"] {
            assert_eq!(canonical_label(raw), HFL_M, "variant: {raw}");
        }
        assert_eq!(
            canonical_label("Water Level at 0800 hrs (m)"),
            WATER_LEVEL_0800
        );
    }

    #[test]
    fn rainfall_substring_overrides_everything() {
        assert_eq!(canonical_label("Rainfall (mm)"), RAINFALL_MM);
        assert_eq!(
            canonical_label("Rainfall (mm) recorded in last 24 hours upto 0830hrs IST"),
            RAINFALL_MM
        );
    }

    #[test]
    fn unmapped_labels_pass_through_normalized() {
        assert_eq!(canonical_label("Gauge Zero (m)"), "gauge_zero_m");
    }

    #[test]
    fn forecast_expands_into_three_fields() {
        let out = finalize_headers(&labels(&["Station", "Forecast", "a", "b"]));
        assert_eq!(
            out,
            vec![STATION, FORECAST_WATERLEVEL_M, FORECAST_TIME, FORECAST_DATE]
        );
    }

    #[test]
    fn forecast_without_room_stays_plain() {
        let out = finalize_headers(&labels(&["Station", "Forecast", "a"]));
        assert_eq!(out, vec![STATION, FORECAST_COMPOUND, "a"]);
    }

    #[test]
    fn duplicate_trend_becomes_trend_01() {
        let out = finalize_headers(&labels(&["Trend", "Station", "Trend"]));
        assert_eq!(out, vec![TREND, STATION, TREND_01]);
    }

    #[test]
    fn header_row_is_promoted() {
        let raw = RawTable::new(vec![
            vec!["Sl No".to_string(), "Station".to_string()],
            vec!["1".to_string(), "Patna".to_string()],
        ]);
        let table = build_table(&raw);
        assert_eq!(table.columns(), &[SL_NO.to_string(), STATION.to_string()]);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn headerless_grid_keeps_every_row() {
        let raw = RawTable::new(vec![
            vec!["1".to_string(), "Patna".to_string()],
            vec!["2".to_string(), "Gaya".to_string()],
        ]);
        let table = build_table(&raw);
        assert_eq!(table.columns(), &["0".to_string(), "1".to_string()]);
        assert_eq!(table.height(), 2);
    }
}
