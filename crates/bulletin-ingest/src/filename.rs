//! Filename contract: ordinal, bulletin date, and session are all carried in
//! the source document's name.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use bulletin_model::{BulletinMetadata, Session};

static DATE_IN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}[.\-]\d{2}[.\-]\d{4}").expect("date pattern compiles"));

/// Fallback bulletin date when the filename carries none.
pub const UNKNOWN_DATE: &str = "0000.00.00";

/// Ordinal used to process documents in batch order: the trailing integer of
/// the file stem, or -1 when the name carries none.
pub fn document_ordinal(name: &str) -> i64 {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().unwrap_or(-1)
}

/// Extracts the bulletin date from the filename, normalized to dot-separated
/// DD.MM.YYYY. Returns [`UNKNOWN_DATE`] when no date substring is present.
pub fn bulletin_date(name: &str) -> String {
    match DATE_IN_NAME.find(name) {
        Some(found) => found.as_str().replace('-', "."),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// Detects the reporting session from case-insensitive filename tokens.
pub fn session(name: &str) -> Session {
    let lowered = name.to_lowercase();
    if lowered.contains("morning") || lowered.contains("(mor") || lowered.contains("0800") {
        return Session::Morning;
    }
    if lowered.contains("evening") || lowered.contains("(eve") || lowered.contains("1800") {
        return Session::Evening;
    }
    Session::Unknown
}

/// Derives the immutable per-document metadata from a document path.
pub fn bulletin_metadata(path: &Path) -> BulletinMetadata {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    BulletinMetadata {
        bulletin_date: bulletin_date(&name),
        session: session(&name),
        source_file: name,
    }
}
