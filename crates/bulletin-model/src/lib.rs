pub mod metadata;
pub mod schema;
pub mod table;

pub use metadata::{BulletinMetadata, Session};
pub use schema::{CANONICAL_FIELDS, CanonicalRow};
pub use table::{CellValue, RawTable, Table};
