pub mod report;
pub mod sink;

pub use report::{BatchReport, DocumentOutcome, write_batch_report_json};
pub use sink::{CsvSink, RowSink, SinkError};
