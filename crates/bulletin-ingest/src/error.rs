use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse grid {path}: {source}")]
    GridParse { path: PathBuf, source: csv::Error },
    /// Neither detection strategy found a table. Fatal for the document,
    /// never for the batch.
    #[error("no tables found in {path}")]
    NoTablesFound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
