//! Batch orchestration: the `ingest` and `schema` commands.

use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use bulletin_ingest::{
    GridExtractor, bulletin_metadata, extract_first_table, list_bulletin_documents,
};
use bulletin_model::CANONICAL_FIELDS;
use bulletin_output::{
    BatchReport, CsvSink, DocumentOutcome, RowSink, write_batch_report_json,
};
use bulletin_transform::normalize_document;

use crate::summary::apply_table_style;
use crate::types::BatchConfig;

/// Name of the sink CSV inside the output directory, matching the canonical
/// table the rows feed.
const SINK_FILE_NAME: &str = "river_levels_bulletin.csv";

/// Processes every document in the configured folder, in filename-ordinal
/// order. Each document is independent: a failure is recorded and the batch
/// moves on.
pub fn run_ingest(config: &BatchConfig) -> Result<BatchReport> {
    let batch_span = info_span!("batch", source_dir = %config.source_dir.display());
    let _batch_guard = batch_span.enter();
    let batch_start = Instant::now();

    let documents = list_bulletin_documents(&config.source_dir).context("list documents")?;
    info!(document_count = documents.len(), "batch started");

    let mut sink = if config.dry_run {
        None
    } else {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("create output dir {}", config.output_dir.display())
        })?;
        let path = config.output_dir.join(SINK_FILE_NAME);
        Some(CsvSink::open(&path).with_context(|| format!("open sink {}", path.display()))?)
    };

    let extractor = GridExtractor;
    let mut report = BatchReport::new(config.source_dir.clone());

    for path in &documents {
        let meta = bulletin_metadata(path);
        let document_span = info_span!(
            "document",
            source_file = %meta.source_file,
            session = %meta.session
        );
        let _document_guard = document_span.enter();
        let document_start = Instant::now();

        let outcome = match extract_first_table(&extractor, path) {
            Ok(raw) => {
                let rows = normalize_document(&raw, &meta, config.normalize);
                let appended = match sink.as_mut() {
                    Some(sink) => sink
                        .append(&rows)
                        .with_context(|| format!("append rows from {}", meta.source_file)),
                    None => Ok(rows.len()),
                };
                match appended {
                    Ok(count) => {
                        info!(
                            rows = count,
                            duration_ms = document_start.elapsed().as_millis(),
                            "document processed"
                        );
                        DocumentOutcome {
                            source_file: meta.source_file.clone(),
                            bulletin_date: meta.bulletin_date.clone(),
                            session: meta.session,
                            rows: count,
                            error: None,
                        }
                    }
                    Err(error) => failure_outcome(&meta, &error.to_string()),
                }
            }
            Err(error) => failure_outcome(&meta, &error.to_string()),
        };
        report.record(outcome);
    }

    if !config.dry_run {
        write_batch_report_json(&config.output_dir, &report).context("write batch report")?;
    }
    info!(
        document_count = report.documents.len(),
        failed_count = report.failed_count(),
        total_rows = report.total_rows,
        duration_ms = batch_start.elapsed().as_millis(),
        "batch complete"
    );
    Ok(report)
}

fn failure_outcome(
    meta: &bulletin_model::BulletinMetadata,
    error: &str,
) -> DocumentOutcome {
    warn!(error, "document skipped");
    DocumentOutcome {
        source_file: meta.source_file.clone(),
        bulletin_date: meta.bulletin_date.clone(),
        session: meta.session,
        rows: 0,
        error: Some(error.to_string()),
    }
}

/// Prints the canonical schema as a table.
pub fn run_schema() {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Type", "Description"]);
    apply_table_style(&mut table);
    for field in CANONICAL_FIELDS {
        let (kind, description) = describe_field(field);
        table.add_row(vec![field, kind, description]);
    }
    println!("{table}");
}

fn describe_field(field: &str) -> (&'static str, &'static str) {
    match field {
        "unique_id" => ("text", "Ordinal, bulletin date and session, underscore-joined"),
        "river" => ("text", "River name, forward-filled within a bulletin"),
        "sl_no" => ("text", "Serial number within the bulletin"),
        "station" => ("text", "Gauging station"),
        "district" => ("text", "District of the station"),
        "warning_level_m" => ("numeric", "Warning level in metres"),
        "danger_level_m" => ("numeric", "Danger level in metres"),
        "hfl_m" => ("numeric", "Highest flood level in metres"),
        "water_level_0800hrs_m" => ("numeric", "Observed level at 08:00 in metres"),
        "water_level_1800hrs_m" => ("numeric", "Observed level at 18:00 in metres"),
        "trend" => ("text", "Level trend (rising/falling/steady)"),
        "trend_01" => ("text", "Second trend column when the source repeats it"),
        "forecast_waterlevel_m" => ("numeric", "Forecast level in metres"),
        "forecast_time" => ("time", "Forecast time of day"),
        "forecast_date" => ("date", "Forecast calendar date"),
        "fc_no" => ("text", "Forecast number"),
        "rainfall_mm" => ("numeric", "Rainfall in millimetres"),
        "remarks" => ("text", "Free-form remarks"),
        "source_file" => ("text", "Source document filename"),
        _ => ("text", ""),
    }
}
