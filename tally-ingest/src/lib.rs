//! tally-ingest: statement content access, per-institution extractors, batch
//! dispatch and CSV output.

pub mod batch;
pub mod document;
pub mod emit;
pub mod parsers;
pub mod pdf;
pub mod profiles;
pub mod types;

pub use batch::{Batch, BatchObserver, BatchReport, DocumentReport, DocumentStatus, list_statements};
pub use document::DocumentReader;
pub use emit::{write_csv, write_csv_file};
pub use pdf::PdfReader;
pub use profiles::{Strategy, strategy_for};
pub use types::{Cell, Extraction, Outcome, Rejection, Row, Table};
