//! Column existence guarantees and final alignment to the canonical schema.

use chrono::{NaiveDate, NaiveTime};

use bulletin_model::schema::{
    DANGER_LEVEL_M, DISTRICT, FC_NO, FORECAST_DATE, FORECAST_TIME, FORECAST_WATERLEVEL_M, HFL_M,
    RAINFALL_MM, REMARKS, RIVER, SL_NO, SOURCE_FILE, STATION, TREND, TREND_01, UNIQUE_ID,
    WARNING_LEVEL_M, WATER_LEVEL_0800, WATER_LEVEL_1800,
};
use bulletin_model::{CanonicalRow, CellValue, Table};

use crate::coerce::{coerce_date, coerce_number, coerce_time};

/// Fields expected straight from the source grid. Ensured as null columns so
/// the later stages can address them unconditionally; the level and
/// water-level columns are guaranteed by their own stages.
const SOURCE_EXPECTED: [&str; 12] = [
    SL_NO,
    STATION,
    DISTRICT,
    RIVER,
    TREND,
    TREND_01,
    FC_NO,
    RAINFALL_MM,
    REMARKS,
    FORECAST_WATERLEVEL_M,
    FORECAST_TIME,
    FORECAST_DATE,
];

pub fn ensure_expected_columns(table: &mut Table) {
    for field in SOURCE_EXPECTED {
        table.ensure_column(field);
    }
}

/// Builds canonical rows in source order, dropping rows that carry no
/// identifying information (station and district both null). Fields the
/// table lacks come out as None; unknown source columns are discarded.
pub fn align_rows(table: &Table) -> Vec<CanonicalRow> {
    let mut rows = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let record = CanonicalRow {
            unique_id: text_field(table, row, UNIQUE_ID).unwrap_or_default(),
            river: text_field(table, row, RIVER),
            sl_no: text_field(table, row, SL_NO),
            station: text_field(table, row, STATION),
            district: text_field(table, row, DISTRICT),
            warning_level_m: number_field(table, row, WARNING_LEVEL_M),
            danger_level_m: number_field(table, row, DANGER_LEVEL_M),
            hfl_m: number_field(table, row, HFL_M),
            water_level_0800hrs_m: number_field(table, row, WATER_LEVEL_0800),
            water_level_1800hrs_m: number_field(table, row, WATER_LEVEL_1800),
            trend: text_field(table, row, TREND),
            trend_01: text_field(table, row, TREND_01),
            forecast_waterlevel_m: number_field(table, row, FORECAST_WATERLEVEL_M),
            forecast_time: time_field(table, row, FORECAST_TIME),
            forecast_date: date_field(table, row, FORECAST_DATE),
            fc_no: text_field(table, row, FC_NO),
            rainfall_mm: number_field(table, row, RAINFALL_MM),
            remarks: text_field(table, row, REMARKS),
            source_file: text_field(table, row, SOURCE_FILE).unwrap_or_default(),
        };
        if record.is_noise() {
            continue;
        }
        rows.push(record);
    }
    rows
}

fn text_field(table: &Table, row: usize, name: &str) -> Option<String> {
    let index = table.column_index(name)?;
    table.cell(row, index).as_text().map(str::to_string)
}

fn number_field(table: &Table, row: usize, name: &str) -> Option<f64> {
    let index = table.column_index(name)?;
    match table.cell(row, index) {
        CellValue::Number(value) => Some(*value),
        CellValue::Text(text) => coerce_number(text),
        _ => None,
    }
}

fn time_field(table: &Table, row: usize, name: &str) -> Option<NaiveTime> {
    let index = table.column_index(name)?;
    match table.cell(row, index) {
        CellValue::Time(time) => Some(*time),
        CellValue::Text(text) => coerce_time(text),
        _ => None,
    }
}

fn date_field(table: &Table, row: usize, name: &str) -> Option<NaiveDate> {
    let index = table.column_index(name)?;
    match table.cell(row, index) {
        CellValue::Date(date) => Some(*date),
        CellValue::Text(text) => coerce_date(text),
        _ => None,
    }
}
