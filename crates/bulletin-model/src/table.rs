//! In-memory table structures the normalization stages operate on.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A raw grid of text cells as produced by the table-extraction boundary.
/// The first row may or may not be a true header; cells may be empty strings
/// or placeholder glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single cell, either still raw text or already coerced to a typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Time(NaiveTime),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    /// Builds a cell from raw extracted text. Whitespace-only text becomes
    /// Missing; placeholder glyphs are preserved for the numeric coercer.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// A named-column table. Rows are kept rectangular: construction pads short
/// rows with Missing and truncates overflow, so every stage can index by
/// column position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from raw text rows under the given column names.
    pub fn from_raw_rows(columns: Vec<String>, raw_rows: &[Vec<String>]) -> Self {
        let width = columns.len();
        let rows = raw_rows
            .iter()
            .map(|raw| {
                let mut row: Vec<CellValue> = raw
                    .iter()
                    .take(width)
                    .map(|cell| CellValue::from_raw(cell))
                    .collect();
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    pub fn remove_row(&mut self, index: usize) -> Vec<CellValue> {
        self.rows.remove(index)
    }

    /// Keeps only the rows whose index satisfies the predicate, preserving
    /// source row order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &[CellValue]) -> bool,
    {
        let mut index = 0;
        self.rows.retain(|row| {
            let kept = keep(index, row);
            index += 1;
            kept
        });
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        &self.rows[row][column]
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: CellValue) {
        self.rows[row][column] = value;
    }

    /// Appends an all-Missing column when the name is not already present.
    pub fn ensure_column(&mut self, name: &str) {
        if self.has_column(name) {
            return;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(CellValue::Missing);
        }
    }

    /// Inserts an all-Missing column at the given position when absent.
    pub fn insert_column(&mut self, position: usize, name: &str) {
        if self.has_column(name) {
            return;
        }
        let position = position.min(self.columns.len());
        self.columns.insert(position, name.to_string());
        for row in &mut self.rows {
            row.insert(position, CellValue::Missing);
        }
    }

    /// Rewrites every cell of a column through the given mapping.
    pub fn map_column<F>(&mut self, column: usize, mut map: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            row[column] = map(&row[column]);
        }
    }

    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |row| &row[column])
    }

    /// True when the named column is absent or holds only Missing cells.
    pub fn column_is_all_missing(&self, name: &str) -> bool {
        match self.column_index(name) {
            Some(index) => self.column_cells(index).all(CellValue::is_missing),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn from_raw_rows_pads_and_truncates() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let table = Table::from_raw_rows(columns, &text_rows(&[&["1"], &["2", "3", "4"]]));
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(0, 1), &CellValue::Missing);
        assert_eq!(table.cell(1, 1), &CellValue::Text("3".to_string()));
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn blank_cells_become_missing() {
        assert!(CellValue::from_raw("   ").is_missing());
        assert_eq!(
            CellValue::from_raw(" x "),
            CellValue::Text("x".to_string())
        );
    }

    #[test]
    fn ensure_column_is_idempotent() {
        let mut table = Table::from_raw_rows(vec!["a".to_string()], &text_rows(&[&["1"]]));
        table.ensure_column("b");
        table.ensure_column("b");
        assert_eq!(table.width(), 2);
        assert!(table.column_is_all_missing("b"));
        assert!(!table.column_is_all_missing("a"));
    }

    #[test]
    fn insert_column_shifts_cells() {
        let mut table = Table::from_raw_rows(vec!["a".to_string()], &text_rows(&[&["1"]]));
        table.insert_column(0, "id");
        assert_eq!(table.columns(), &["id".to_string(), "a".to_string()]);
        assert_eq!(table.cell(0, 0), &CellValue::Missing);
        assert_eq!(table.cell(0, 1), &CellValue::Text("1".to_string()));
    }
}
