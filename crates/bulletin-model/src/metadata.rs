//! Per-document metadata derived from the bulletin filename.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting time-slot of a bulletin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    Morning,
    Evening,
    Unknown,
}

impl Session {
    pub fn as_str(self) -> &'static str {
        match self {
            Session::Morning => "Morning",
            Session::Evening => "Evening",
            Session::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one source document, derived once from its filename and
/// immutable while the document is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinMetadata {
    /// Bare filename of the source document.
    pub source_file: String,
    /// Dot-separated DD.MM.YYYY, or "0000.00.00" when no date was found.
    pub bulletin_date: String,
    pub session: Session,
}
