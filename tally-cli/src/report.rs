use tally_core::transaction::truncate_chars;
use tally_core::{Detection, Transaction};
use tally_ingest::BatchObserver;

/// Prints per-document and per-record progress lines to stdout
pub struct ConsoleReport;

impl BatchObserver for ConsoleReport {
    fn on_document(&mut self, file_name: &str, detection: Detection) {
        println!("{}", document_line(file_name, detection));
    }

    fn on_record(&mut self, txn: &Transaction) {
        println!("{}", record_line(txn));
    }
}

pub fn document_line(file_name: &str, detection: Detection) -> String {
    format!("Processing: {file_name} ({detection})")
}

pub fn record_line(txn: &Transaction) -> String {
    format!(
        "  {}: {} {:.2} = {}",
        txn.date(),
        txn.kind(),
        txn.amount(),
        truncate_chars(txn.description(), 30)
    )
}
