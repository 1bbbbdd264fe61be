use std::collections::BTreeMap;

use tally_core::{InvalidTransaction, Transaction};

/// A table cell as recovered from a page; empty cells are `None`
pub type Cell = Option<String>;
pub type Row = Vec<Cell>;
pub type Table = Vec<Row>;

/// Why a candidate line or row did not become a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, thiserror::Error)]
pub enum Rejection {
    #[error("no date established")]
    NoDate,
    #[error("contains a noise marker")]
    Noise,
    #[error("no transaction keyword")]
    NoKeyword,
    #[error("no amount token")]
    NoAmount,
    #[error("amount is not a valid decimal")]
    MalformedAmount,
    #[error("amount at or below the noise floor")]
    BelowFloor,
    #[error("matches an exclusion marker")]
    Excluded,
    #[error("row has fewer than two cells")]
    TooFewCells,
    #[error("no activity pattern")]
    NoAction,
    #[error("description too short")]
    ShortDescription,
    #[error("amount is zero")]
    ZeroAmount,
}

impl From<InvalidTransaction> for Rejection {
    fn from(err: InvalidTransaction) -> Self {
        match err {
            InvalidTransaction::ShortDescription => Rejection::ShortDescription,
            InvalidTransaction::ZeroAmount => Rejection::ZeroAmount,
        }
    }
}

/// Result of examining one candidate line/row
pub type Outcome = Result<Transaction, Rejection>;

/// Everything an extractor produced for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<Transaction>,
    pub rejected: Vec<Rejection>,
}

impl Extraction {
    pub fn push(&mut self, outcome: Outcome) {
        match outcome {
            Ok(txn) => self.records.push(txn),
            Err(reason) => self.rejected.push(reason),
        }
    }

    /// Rejections grouped by reason
    pub fn rejection_counts(&self) -> BTreeMap<Rejection, usize> {
        let mut counts = BTreeMap::new();
        for reason in &self.rejected {
            *counts.entry(*reason).or_insert(0) += 1;
        }
        counts
    }

    pub fn rejected_count(&self, reason: Rejection) -> usize {
        self.rejected.iter().filter(|r| **r == reason).count()
    }
}

impl FromIterator<Outcome> for Extraction {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut out = Extraction::default();
        for outcome in iter {
            out.push(outcome);
        }
        out
    }
}
