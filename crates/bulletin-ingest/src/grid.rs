//! Grid extractor for pre-extracted bulletin tables stored as text files.
//!
//! Lattice reads the file as a delimited grid (comma, or tab for .tsv);
//! Stream splits each line on runs of two or more spaces. A detected table
//! must have at least one row and two columns in some row, mirroring the
//! behavior of ruled-line table detectors that report "no table" on plain
//! prose pages.

use std::path::Path;

use csv::ReaderBuilder;

use bulletin_model::RawTable;

use crate::error::{IngestError, Result};
use crate::extract::{DetectionStrategy, TableExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct GridExtractor;

impl GridExtractor {
    fn lattice_rows(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)
            .map_err(|e| map_csv_error(path, e))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| map_csv_error(path, e))?;
            let row: Vec<String> = record.iter().map(normalize_cell).collect();
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn stream_rows(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        let content = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut rows = Vec::new();
        for line in content.lines() {
            let row: Vec<String> = line
                .split("  ")
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
                .collect();
            if row.is_empty() {
                continue;
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

impl TableExtractor for GridExtractor {
    fn detect_tables(&self, path: &Path, strategy: DetectionStrategy) -> Result<Vec<RawTable>> {
        let rows = match strategy {
            DetectionStrategy::Lattice => self.lattice_rows(path)?,
            DetectionStrategy::Stream => self.stream_rows(path)?,
        };
        let has_grid_shape = rows.iter().any(|row| row.len() >= 2);
        if rows.is_empty() || !has_grid_shape {
            return Ok(Vec::new());
        }
        Ok(vec![RawTable::new(rows)])
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn map_csv_error(path: &Path, error: csv::Error) -> IngestError {
    IngestError::GridParse {
        path: path.to_path_buf(),
        source: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_first_table;
    use tempfile::TempDir;

    #[test]
    fn lattice_detects_comma_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulletin_01.csv");
        std::fs::write(&path, "Sl No,Station,District\n1,Patna,Patna\n\n").unwrap();

        let tables = GridExtractor
            .detect_tables(&path, DetectionStrategy::Lattice)
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[1], vec!["1", "Patna", "Patna"]);
    }

    #[test]
    fn stream_detects_space_aligned_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulletin_02.txt");
        std::fs::write(&path, "Sl No  Station   District\n1  Patna  Patna\n").unwrap();

        let tables = GridExtractor
            .detect_tables(&path, DetectionStrategy::Stream)
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0], vec!["Sl No", "Station", "District"]);
    }

    #[test]
    fn prose_page_detects_nothing_under_lattice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulletin_03.csv");
        std::fs::write(&path, "no table here\njust words\n").unwrap();

        let tables = GridExtractor
            .detect_tables(&path, DetectionStrategy::Lattice)
            .unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn empty_document_fails_both_strategies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulletin_04.csv");
        std::fs::write(&path, "").unwrap();

        let error = extract_first_table(&GridExtractor, &path).unwrap_err();
        assert!(matches!(error, IngestError::NoTablesFound { .. }));
    }
}
