//! Bulletin document discovery and batch ordering.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::filename::document_ordinal;

/// Extensions the shipped grid extractor understands.
const GRID_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Lists bulletin documents in a directory, sorted ascending by the trailing
/// integer in the filename. Documents without a parseable number share the
/// sentinel ordinal -1 and are ordered among themselves by name.
pub fn list_bulletin_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_grid = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                GRID_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);
        if is_grid {
            files.push(path);
        }
    }

    files.sort_by(|a, b| {
        let left = ordinal_of(a);
        let right = ordinal_of(b);
        left.cmp(&right).then_with(|| a.file_name().cmp(&b.file_name()))
    });

    Ok(files)
}

fn ordinal_of(path: &Path) -> i64 {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(document_ordinal)
        .unwrap_or(-1)
}
