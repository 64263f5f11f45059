//! Structural row cleanup: re-stated header/unit rows near the top, and the
//! numeric serial-number guard.

use bulletin_model::schema::SL_NO;
use bulletin_model::{CellValue, Table};

/// Tokens whose presence in a row's concatenated text marks it as a
/// header/unit row rather than data.
const HEADER_TOKENS: [&str; 12] = [
    "warning",
    "danger",
    "h.f.l",
    "hfl",
    "water level",
    "forecast",
    "rainfall",
    "remarks",
    "trend",
    "station",
    "district",
    "sl",
];

/// Maximum number of leading rows that may be dropped. Header/unit rows
/// sometimes repeat near the top, but real data can also mention these
/// tokens, so deletion is capped.
const MAX_HEADER_ROWS: usize = 3;

fn row_looks_headerish(row: &[CellValue]) -> bool {
    let text = row
        .iter()
        .filter_map(CellValue::as_text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    HEADER_TOKENS.iter().any(|token| text.contains(token))
}

/// Drops leading rows that restate headers or units, re-checking the new
/// first row after each drop. Returns how many rows were removed.
pub fn strip_leading_header_rows(table: &mut Table) -> usize {
    let mut removed = 0;
    while removed < MAX_HEADER_ROWS {
        if table.height() == 0 || !row_looks_headerish(&table.rows()[0]) {
            break;
        }
        table.remove_row(0);
        removed += 1;
    }
    removed
}

fn is_plain_integer(cell: &CellValue) -> bool {
    match cell.as_text() {
        Some(text) => !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit()),
        None => false,
    }
}

/// Keeps only rows whose serial number is a pure non-negative integer. When
/// no row qualifies (column garbled or absent) the filter is skipped
/// entirely; a total-match failure must never empty the table.
pub fn retain_numeric_serials(table: &mut Table) {
    let Some(index) = table.column_index(SL_NO) else {
        return;
    };
    if !table.column_cells(index).any(is_plain_integer) {
        return;
    }
    table.retain_rows(|_, row| is_plain_integer(&row[index]));
}
