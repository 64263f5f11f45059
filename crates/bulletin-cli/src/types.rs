use std::path::PathBuf;

use bulletin_transform::NormalizeOptions;

/// Explicit batch configuration handed to the orchestrator; nothing is read
/// from ambient process state.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Folder holding the source documents.
    pub source_dir: PathBuf,
    /// Directory receiving the sink CSV and the batch report.
    pub output_dir: PathBuf,
    /// Normalize and count without writing any output file.
    pub dry_run: bool,
    /// Per-document normalization options.
    pub normalize: NormalizeOptions,
}
