//! Tabular card statement scanner (Standard Chartered family)
//!
//! Rows come from the table grids of each page. All non-empty cells are
//! joined into one string before matching:
//!   | 5月20日 | 5月21日 | STARBUCKS Transaction Ref 99887 | 123.45 |
//! Every accepted row is a spend, so records are always debits.

use anyhow::Result;
use regex::Regex;
use tally_core::{Transaction, TxnType};

use super::parse_amount;
use crate::types::{Extraction, Outcome, Rejection, Row, Table};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableScanProfile {
    pub account: &'static str,
    pub currency: &'static str,
    /// Unanchored; the first match is the record's date
    pub date_pattern: &'static str,
    /// Rows containing any of these are not transactions
    pub exclusion_markers: &'static [&'static str],
    pub noise_floor: f64,
}

struct RowScanner<'a> {
    profile: &'a TableScanProfile,
    date_re: Regex,
    amount_re: Regex,
    amount_strip_re: Regex,
    reference_re: Regex,
}

impl<'a> RowScanner<'a> {
    fn new(profile: &'a TableScanProfile) -> Result<Self> {
        Ok(Self {
            profile,
            date_re: Regex::new(profile.date_pattern)?,
            amount_re: Regex::new(r"(\d+[\d,]+\.\d{2})(?:\s|$)")?,
            amount_strip_re: Regex::new(r"\d+[\d,]+\.\d{2}")?,
            reference_re: Regex::new(r"Transaction Ref.*")?,
        })
    }

    fn scan(&self, row: &Row) -> Outcome {
        if row.len() < 2 {
            return Err(Rejection::TooFewCells);
        }
        let row_text = join_cells(row);

        let date = self
            .date_re
            .find(&row_text)
            .ok_or(Rejection::NoDate)?
            .as_str();
        let amount_caps = self.amount_re.captures(&row_text).ok_or(Rejection::NoAmount)?;
        let amount = parse_amount(&amount_caps[1])?;

        let p = self.profile;
        if amount <= p.noise_floor {
            return Err(Rejection::BelowFloor);
        }
        if p.exclusion_markers.iter().any(|m| row_text.contains(m)) {
            return Err(Rejection::Excluded);
        }

        let desc = self.date_re.replace_all(&row_text, "");
        let desc = self.amount_strip_re.replace_all(&desc, "");
        let desc = self.reference_re.replace_all(&desc, "");

        Transaction::new(date, p.account, TxnType::Debit, &desc, amount, p.currency)
            .map_err(Rejection::from)
    }
}

/// Join the non-empty cells of a row with single spaces
pub fn join_cells(row: &Row) -> String {
    row.iter()
        .filter_map(|c| c.as_deref())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan every row of every table, in page order.
pub fn parse_table_rows(tables: &[Table], profile: &TableScanProfile) -> Result<Extraction> {
    let scanner = RowScanner::new(profile)?;
    Ok(tables
        .iter()
        .flat_map(|table| table.iter())
        .map(|row| scanner.scan(row))
        .collect())
}
