//! Append-only sinks for canonical rows.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use bulletin_model::{CANONICAL_FIELDS, CanonicalRow};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Destination for normalized rows. Appends are per-document and are never
/// rolled back; deduplication across reprocessing runs is the backing
/// store's concern, not the sink's.
pub trait RowSink {
    fn append(&mut self, rows: &[CanonicalRow]) -> Result<usize, SinkError>;
}

/// File sink writing the canonical 19-column CSV. The header is written only
/// when the file is created or empty; subsequent batches append below it.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<std::fs::File>,
}

impl CsvSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let needs_header = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().from_writer(file);
        if needs_header {
            writer.write_record(CANONICAL_FIELDS)?;
            writer.flush()?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSink for CsvSink {
    fn append(&mut self, rows: &[CanonicalRow]) -> Result<usize, SinkError> {
        for row in rows {
            self.writer.write_record(record_cells(row))?;
        }
        self.writer.flush()?;
        debug!(path = %self.path.display(), rows = rows.len(), "rows appended");
        Ok(rows.len())
    }
}

/// Serializes a row into the canonical column order; None becomes an empty
/// cell rather than being dropped.
fn record_cells(row: &CanonicalRow) -> Vec<String> {
    vec![
        row.unique_id.clone(),
        text_cell(row.river.as_deref()),
        text_cell(row.sl_no.as_deref()),
        text_cell(row.station.as_deref()),
        text_cell(row.district.as_deref()),
        number_cell(row.warning_level_m),
        number_cell(row.danger_level_m),
        number_cell(row.hfl_m),
        number_cell(row.water_level_0800hrs_m),
        number_cell(row.water_level_1800hrs_m),
        text_cell(row.trend.as_deref()),
        text_cell(row.trend_01.as_deref()),
        number_cell(row.forecast_waterlevel_m),
        row.forecast_time
            .map(|time| time.format("%H:%M:%S").to_string())
            .unwrap_or_default(),
        row.forecast_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        text_cell(row.fc_no.as_deref()),
        number_cell(row.rainfall_mm),
        text_cell(row.remarks.as_deref()),
        row.source_file.clone(),
    ]
}

fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn number_cell(value: Option<f64>) -> String {
    value.map(format_numeric).unwrap_or_default()
}

/// Formats a reading without trailing zeros ("10.50" -> "10.5", "10.0" -> "10").
fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
