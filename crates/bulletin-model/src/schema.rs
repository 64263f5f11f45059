//! The canonical row schema every bulletin is normalized into.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const UNIQUE_ID: &str = "unique_id";
pub const RIVER: &str = "river";
pub const SL_NO: &str = "sl_no";
pub const STATION: &str = "station";
pub const DISTRICT: &str = "district";
pub const WARNING_LEVEL_M: &str = "warning_level_m";
pub const DANGER_LEVEL_M: &str = "danger_level_m";
pub const HFL_M: &str = "hfl_m";
pub const WATER_LEVEL_0800: &str = "water_level_0800hrs_m";
pub const WATER_LEVEL_1800: &str = "water_level_1800hrs_m";
pub const TREND: &str = "trend";
pub const TREND_01: &str = "trend_01";
pub const FORECAST_WATERLEVEL_M: &str = "forecast_waterlevel_m";
pub const FORECAST_TIME: &str = "forecast_time";
pub const FORECAST_DATE: &str = "forecast_date";
pub const FC_NO: &str = "fc_no";
pub const RAINFALL_MM: &str = "rainfall_mm";
pub const REMARKS: &str = "remarks";
pub const SOURCE_FILE: &str = "source_file";

/// Canonical column order. The sink writes exactly these, in this order.
pub const CANONICAL_FIELDS: [&str; 19] = [
    UNIQUE_ID,
    RIVER,
    SL_NO,
    STATION,
    DISTRICT,
    WARNING_LEVEL_M,
    DANGER_LEVEL_M,
    HFL_M,
    WATER_LEVEL_0800,
    WATER_LEVEL_1800,
    TREND,
    TREND_01,
    FORECAST_WATERLEVEL_M,
    FORECAST_TIME,
    FORECAST_DATE,
    FC_NO,
    RAINFALL_MM,
    REMARKS,
    SOURCE_FILE,
];

/// One normalized bulletin record. Every field is either a typed value or
/// None, never absent; the sink serializes None as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub unique_id: String,
    pub river: Option<String>,
    pub sl_no: Option<String>,
    pub station: Option<String>,
    pub district: Option<String>,
    pub warning_level_m: Option<f64>,
    pub danger_level_m: Option<f64>,
    pub hfl_m: Option<f64>,
    pub water_level_0800hrs_m: Option<f64>,
    pub water_level_1800hrs_m: Option<f64>,
    pub trend: Option<String>,
    pub trend_01: Option<String>,
    pub forecast_waterlevel_m: Option<f64>,
    pub forecast_time: Option<NaiveTime>,
    pub forecast_date: Option<NaiveDate>,
    pub fc_no: Option<String>,
    pub rainfall_mm: Option<f64>,
    pub remarks: Option<String>,
    pub source_file: String,
}

impl CanonicalRow {
    /// True when the row carries no identifying information and should be
    /// treated as trailing noise (blank rows, footnotes).
    pub fn is_noise(&self) -> bool {
        self.station.is_none() && self.district.is_none()
    }
}
