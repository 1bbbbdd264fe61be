//! Normalized transaction record shared by every statement extractor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum description length, in characters
pub const DESCRIPTION_MAX: usize = 60;
/// Maximum vendor length, in characters
pub const VENDOR_MAX: usize = 40;

/// Direction of money flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnType {
    Credit,
    Debit,
}

impl TxnType {
    /// Direction implied by the arithmetic sign (zero counts as a debit)
    pub fn from_signed(amount: f64) -> Self {
        if amount > 0.0 {
            TxnType::Credit
        } else {
            TxnType::Debit
        }
    }

    /// Apply this direction's sign to a magnitude
    pub fn signed(&self, magnitude: f64) -> f64 {
        match self {
            TxnType::Credit => magnitude.abs(),
            TxnType::Debit => -magnitude.abs(),
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxnType::Credit => f.write_str("Credit"),
            TxnType::Debit => f.write_str("Debit"),
        }
    }
}

/// Why a candidate record could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransaction {
    #[error("description too short")]
    ShortDescription,
    #[error("amount is zero or not finite")]
    ZeroAmount,
}

/// A single statement line, normalized across institutions.
///
/// Fields are private so the sign and length invariants can only be
/// established through [`Transaction::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date: String,
    account: String,
    kind: TxnType,
    description: String,
    vendor: String,
    amount: f64,
    currency: String,
}

impl Transaction {
    /// Build a record from an unsigned magnitude.
    ///
    /// The description is trimmed and cut to [`DESCRIPTION_MAX`] characters;
    /// the vendor is its first [`VENDOR_MAX`] characters. Fails when the
    /// cleaned description has two characters or fewer, or the magnitude is
    /// zero or not finite.
    pub fn new(
        date: impl Into<String>,
        account: impl Into<String>,
        kind: TxnType,
        description: &str,
        magnitude: f64,
        currency: impl Into<String>,
    ) -> Result<Self, InvalidTransaction> {
        let description = truncate_chars(description.trim(), DESCRIPTION_MAX).trim_end();
        if description.chars().count() <= 2 {
            return Err(InvalidTransaction::ShortDescription);
        }
        if !magnitude.is_finite() || magnitude == 0.0 {
            return Err(InvalidTransaction::ZeroAmount);
        }

        Ok(Self {
            date: date.into(),
            account: account.into(),
            kind,
            vendor: truncate_chars(description, VENDOR_MAX).trim_end().to_string(),
            description: description.to_string(),
            amount: kind.signed(magnitude),
            currency: currency.into(),
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kind(&self) -> TxnType {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Positive = credit, negative = debit
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TxnType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TxnType::Debit
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Longest prefix of `s` holding at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
