//! Best-effort value coercion. Every function here is total: whatever the
//! cell text, the result is a typed value or None, never an error.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use bulletin_model::schema::{
    DANGER_LEVEL_M, FORECAST_DATE, FORECAST_TIME, FORECAST_WATERLEVEL_M, HFL_M, RAINFALL_MM,
    WARNING_LEVEL_M, WATER_LEVEL_0800, WATER_LEVEL_1800,
};
use bulletin_model::{CellValue, Table};

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern compiles"));

/// Columns holding metre/millimetre readings.
const NUMERIC_FIELDS: [&str; 7] = [
    WARNING_LEVEL_M,
    DANGER_LEVEL_M,
    HFL_M,
    WATER_LEVEL_0800,
    WATER_LEVEL_1800,
    FORECAST_WATERLEVEL_M,
    RAINFALL_MM,
];

/// Extracts the first signed decimal token from free-form cell text.
/// Placeholder dashes and empty text yield None.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "\u{2014}" {
        return None;
    }
    NUMBER_TOKEN
        .find(trimmed)
        .and_then(|token| token.as_str().parse().ok())
}

/// Parses a time of day, tolerating dot separators and the bare 4-digit
/// "0800" form.
pub fn coerce_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut text = trimmed.replace('.', ":");
    if text.len() == 4 && text.chars().all(|ch| ch.is_ascii_digit()) {
        text = format!("{}:{}", &text[..2], &text[2..]);
    }
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(&text, format) {
            return Some(time);
        }
    }
    None
}

/// Parses a day-first calendar date, normalizing `/` and `.` separators.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let text = trimmed.replace(['/', '.'], "-");
    for format in ["%d-%m-%Y", "%d-%m-%y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
            return Some(date);
        }
    }
    None
}

/// Numeric coercion of a single cell; already-typed numbers pass through.
pub fn numeric_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Number(value) => CellValue::Number(*value),
        CellValue::Text(text) => match coerce_number(text) {
            Some(value) => CellValue::Number(value),
            None => CellValue::Missing,
        },
        _ => CellValue::Missing,
    }
}

/// Rewrites a whole column through numeric coercion.
pub fn coerce_column_numeric(table: &mut Table, column: usize) {
    table.map_column(column, numeric_cell);
}

/// Applies the typed coercions to every canonical column that carries them.
pub fn apply_type_coercion(table: &mut Table) {
    for field in NUMERIC_FIELDS {
        if let Some(index) = table.column_index(field) {
            coerce_column_numeric(table, index);
        }
    }
    if let Some(index) = table.column_index(FORECAST_TIME) {
        table.map_column(index, |cell| match cell {
            CellValue::Time(time) => CellValue::Time(*time),
            CellValue::Text(text) => match coerce_time(text) {
                Some(time) => CellValue::Time(time),
                None => CellValue::Missing,
            },
            _ => CellValue::Missing,
        });
    }
    if let Some(index) = table.column_index(FORECAST_DATE) {
        table.map_column(index, |cell| match cell {
            CellValue::Date(date) => CellValue::Date(*date),
            CellValue::Text(text) => match coerce_date(text) {
                Some(date) => CellValue::Date(date),
                None => CellValue::Missing,
            },
            _ => CellValue::Missing,
        });
    }
}
