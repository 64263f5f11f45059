//! Batch report: the per-document outcomes of one ingest run, serializable
//! for machine consumption alongside the console summary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use bulletin_model::Session;

use crate::sink::SinkError;

/// Outcome of one document: either a row count or the failure that made the
/// batch skip it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub source_file: String,
    pub bulletin_date: String,
    pub session: Session,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub source_dir: PathBuf,
    pub documents: Vec<DocumentOutcome>,
    pub total_rows: usize,
}

impl BatchReport {
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            documents: Vec::new(),
            total_rows: 0,
        }
    }

    pub fn record(&mut self, outcome: DocumentOutcome) {
        self.total_rows += outcome.rows;
        self.documents.push(outcome);
    }

    pub fn failed_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|outcome| outcome.is_failure())
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.documents.iter().any(DocumentOutcome::is_failure)
    }
}

/// Writes the batch report as pretty-printed JSON into the output directory
/// and returns the written path.
pub fn write_batch_report_json(output_dir: &Path, report: &BatchReport) -> Result<PathBuf, SinkError> {
    let path = output_dir.join("batch_report.json");
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, report).map_err(|e| SinkError::Io(e.into()))?;
    debug!(path = %path.display(), documents = report.documents.len(), "batch report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn outcome(file: &str, rows: usize, error: Option<&str>) -> DocumentOutcome {
        DocumentOutcome {
            source_file: file.to_string(),
            bulletin_date: "25.08.2024".to_string(),
            session: Session::Evening,
            rows,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn totals_accumulate_across_documents() {
        let mut report = BatchReport::new(PathBuf::from("bulletins"));
        report.record(outcome("a_01.csv", 12, None));
        report.record(outcome("a_02.csv", 0, Some("no tables found")));
        report.record(outcome("a_03.csv", 7, None));

        assert_eq!(report.total_rows, 19);
        assert_eq!(report.failed_count(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn report_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let mut report = BatchReport::new(PathBuf::from("bulletins"));
        report.record(outcome("a_01.csv", 3, None));

        let path = write_batch_report_json(dir.path(), &report).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let round: BatchReport = serde_json::from_str(&content).unwrap();
        assert_eq!(round.total_rows, 3);
        assert_eq!(round.documents.len(), 1);
        assert!(!round.has_failures());
    }
}
