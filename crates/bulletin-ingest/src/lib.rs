pub mod discovery;
pub mod error;
pub mod extract;
pub mod filename;
pub mod grid;

pub use discovery::list_bulletin_documents;
pub use error::{IngestError, Result};
pub use extract::{DetectionStrategy, TableExtractor, extract_first_table};
pub use filename::{bulletin_metadata, document_ordinal};
pub use grid::GridExtractor;
