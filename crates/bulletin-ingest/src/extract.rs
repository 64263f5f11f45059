//! The table-extraction boundary.
//!
//! Turning a page image or PDF into a grid of text cells is an external
//! concern; this module only fixes the contract: an extractor exposes at
//! least two detection strategies, tried in order, and a document where both
//! strategies come up empty is a hard failure for that document.

use std::path::Path;

use tracing::debug;

use bulletin_model::RawTable;

use crate::error::{IngestError, Result};

/// Table-detection strategy, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    /// Ruled-line detection: cell boundaries are explicit in the source.
    Lattice,
    /// Whitespace detection: cell boundaries are inferred from spacing.
    Stream,
}

impl DetectionStrategy {
    pub const ORDERED: [DetectionStrategy; 2] =
        [DetectionStrategy::Lattice, DetectionStrategy::Stream];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionStrategy::Lattice => "lattice",
            DetectionStrategy::Stream => "stream",
        }
    }
}

/// External collaborator turning a source document into raw text grids.
pub trait TableExtractor {
    /// Returns every table the strategy detects in the document, in page
    /// order. An empty vec means the strategy found nothing; only I/O or
    /// parse problems are errors.
    fn detect_tables(&self, path: &Path, strategy: DetectionStrategy) -> Result<Vec<RawTable>>;
}

/// Extracts the first table of a document, trying each detection strategy in
/// order. Zero tables under every strategy is a per-document failure.
pub fn extract_first_table(extractor: &dyn TableExtractor, path: &Path) -> Result<RawTable> {
    for strategy in DetectionStrategy::ORDERED {
        let mut tables = extractor.detect_tables(path, strategy)?;
        if let Some(first) = (!tables.is_empty()).then(|| tables.remove(0)) {
            debug!(
                path = %path.display(),
                strategy = strategy.as_str(),
                rows = first.rows.len(),
                "table detected"
            );
            return Ok(first);
        }
    }
    Err(IngestError::NoTablesFound {
        path: path.to_path_buf(),
    })
}
