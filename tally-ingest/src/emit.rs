//! CSV output for normalized transactions.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::{Transaction, TxnType};

pub const HEADER: [&str; 7] = [
    "Date",
    "Account",
    "Type",
    "Description",
    "Vendor",
    "Amount",
    "Currency",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Type")]
    kind: TxnType,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Vendor")]
    vendor: &'a str,
    /// Fixed two decimals keeps reruns byte-identical
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Currency")]
    currency: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            date: txn.date(),
            account: txn.account(),
            kind: txn.kind(),
            description: txn.description(),
            vendor: txn.vendor(),
            amount: format!("{:.2}", txn.amount()),
            currency: txn.currency(),
        }
    }
}

/// Write a header plus one row per record, CRLF-terminated.
pub fn write_csv<W: Write>(out: W, records: &[Transaction]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    // Written by hand so an empty batch still gets a header row.
    wtr.write_record(HEADER)?;
    for txn in records {
        wtr.serialize(CsvRow::from(txn))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

pub fn write_csv_file(path: &Path, records: &[Transaction]) -> Result<()> {
    let file = create_output(path)?;
    write_csv(file, records).with_context(|| format!("writing {}", path.display()))
}
