//! Recovery of missing warning/danger/flood-level columns from alternately
//! named source columns.

use std::sync::LazyLock;

use regex::Regex;

use bulletin_model::schema::{DANGER_LEVEL_M, HFL_M, WARNING_LEVEL_M};
use bulletin_model::Table;

use crate::coerce::numeric_cell;

static WARNING_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&["warning.*m", "w_?l.*m"]));
static DANGER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&["danger.*m", "d_?l.*m"]));
static HFL_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"h[\W_]*f[\W_]*l.*m", "hfl.*m"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("level pattern compiles"))
        .collect()
}

/// Populates each of the three level fields from the first alternately named
/// column matching its patterns, coercing values numerically. A field that
/// already holds any non-null value is never overwritten; when no alternate
/// matches, the field stays null.
pub fn backfill_levels(table: &mut Table) {
    backfill(table, WARNING_LEVEL_M, &WARNING_PATTERNS);
    backfill(table, DANGER_LEVEL_M, &DANGER_PATTERNS);
    backfill(table, HFL_M, &HFL_PATTERNS);
}

fn backfill(table: &mut Table, target: &str, patterns: &[Regex]) {
    table.ensure_column(target);
    let Some(target_index) = table.column_index(target) else {
        return;
    };
    if !table.column_is_all_missing(target) {
        return;
    }
    let source_index = table.columns().iter().enumerate().find_map(|(index, name)| {
        let lowered = name.to_lowercase();
        let matched =
            index != target_index && patterns.iter().any(|pattern| pattern.is_match(&lowered));
        matched.then_some(index)
    });
    let Some(source_index) = source_index else {
        return;
    };
    for row in 0..table.height() {
        let coerced = numeric_cell(table.cell(row, source_index));
        table.set_cell(row, target_index, coerced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulletin_model::CellValue;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let columns = columns.iter().map(|name| (*name).to_string()).collect();
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        Table::from_raw_rows(columns, &rows)
    }

    #[test]
    fn fills_from_abbreviated_column() {
        let mut t = table(&["station", "w_l_m"], &[&["Patna", "48.6"], &["Gaya", "-"]]);
        backfill_levels(&mut t);
        let index = t.column_index(WARNING_LEVEL_M).unwrap();
        assert_eq!(t.cell(0, index), &CellValue::Number(48.6));
        assert_eq!(t.cell(1, index), &CellValue::Missing);
    }

    #[test]
    fn existing_values_are_never_overwritten() {
        let mut t = table(
            &["warning_level_m", "w_l_m"],
            &[&["40.0", "99.9"], &["", "99.9"]],
        );
        backfill_levels(&mut t);
        let index = t.column_index(WARNING_LEVEL_M).unwrap();
        assert_eq!(t.cell(0, index), &CellValue::Text("40.0".to_string()));
        assert_eq!(t.cell(1, index), &CellValue::Missing);
    }

    #[test]
    fn exhaustion_leaves_the_field_null() {
        let mut t = table(&["station"], &[&["Patna"]]);
        backfill_levels(&mut t);
        assert!(t.column_is_all_missing(WARNING_LEVEL_M));
        assert!(t.column_is_all_missing(DANGER_LEVEL_M));
        assert!(t.column_is_all_missing(HFL_M));
    }

    #[test]
    fn dotted_hfl_variant_matches() {
        let mut t = table(&["station", "h.f.l m"], &[&["Patna", "52.1"]]);
        backfill_levels(&mut t);
        let index = t.column_index(HFL_M).unwrap();
        assert_eq!(t.cell(0, index), &CellValue::Number(52.1));
    }
}
