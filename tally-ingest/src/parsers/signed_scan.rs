//! Scanner for statements that already print a signed amount
//!
//! Expected text rows:
//!   02 Jan 2025   Salary from ACME LTD          +25,000.00 HKD
//!   03 Jan 2025   STARBUCKS CENTRAL                -45.60 HKD
//!
//! Direction comes from the sign alone; no keyword heuristics.

use anyhow::Result;
use regex::Regex;
use tally_core::{Transaction, TxnType};

use super::parse_amount;
use crate::types::{Extraction, Outcome, Rejection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedScanProfile {
    pub account: &'static str,
    pub currency: &'static str,
    /// Anchored; capture group 1 is the date token
    pub date_pattern: &'static str,
    /// Keep only negative (spending) amounts
    pub debits_only: bool,
    /// Magnitudes at or below this are dropped
    pub noise_floor: f64,
}

/// Scan each line for a date and a currency-suffixed signed amount.
pub fn parse_signed_scan_text(text: &str, profile: &SignedScanProfile) -> Result<Extraction> {
    let date_re = Regex::new(profile.date_pattern)?;
    let amount_re = Regex::new(&format!(
        r"(?P<sign>[-+])?\s*(?P<amt>[\d,]+\.\d{{2}})\s*{}",
        regex::escape(profile.currency)
    ))?;

    let scan = |line: &str| -> Outcome {
        let date_caps = date_re.captures(line).ok_or(Rejection::NoDate)?;
        let date_tok = date_caps.get(1).ok_or(Rejection::NoDate)?;

        let caps = amount_re.captures(line).ok_or(Rejection::NoAmount)?;
        let magnitude = parse_amount(&caps["amt"])?;
        let signed = match caps.name("sign").map(|m| m.as_str()) {
            Some("-") => -magnitude,
            _ => magnitude,
        };

        if profile.debits_only && signed >= 0.0 {
            return Err(Rejection::Excluded);
        }
        if signed.abs() <= profile.noise_floor {
            return Err(Rejection::BelowFloor);
        }

        let whole = caps.get(0).ok_or(Rejection::NoAmount)?;
        let desc_end = whole.start().max(date_tok.end());
        let desc = &line[date_tok.end()..desc_end];

        Transaction::new(
            date_tok.as_str(),
            profile.account,
            TxnType::from_signed(signed),
            desc,
            magnitude,
            profile.currency,
        )
        .map_err(Rejection::from)
    };

    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(scan)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{MOX, ZA_BANK};

    const SAMPLE: &str = r#"
Account activity
02 Jan 2025   Salary from ACME LTD          +25,000.00 HKD
03 Jan 2025   STARBUCKS CENTRAL                -45.60 HKD
04 Jan 2025   OCTOPUS TOP UP                    -5.00 HKD
05 Jan 2025   Interest                           0.00 HKD
"#;

    #[test]
    fn test_za_bank_keeps_both_signs() {
        let out = parse_signed_scan_text(SAMPLE, &ZA_BANK).unwrap();
        assert_eq!(out.records.len(), 3);

        let salary = &out.records[0];
        assert_eq!(salary.date(), "02 Jan 2025");
        assert!(salary.is_credit());
        assert_eq!(salary.amount(), 25000.0);
        assert_eq!(salary.description(), "Salary from ACME LTD");

        let coffee = &out.records[1];
        assert!(coffee.is_debit());
        assert_eq!(coffee.amount(), -45.60);
        assert_eq!(coffee.description(), "STARBUCKS CENTRAL");

        assert_eq!(out.rejected_count(Rejection::NoDate), 1);
        assert_eq!(out.rejected_count(Rejection::BelowFloor), 1);
    }

    #[test]
    fn test_mox_keeps_spending_above_floor() {
        let out = parse_signed_scan_text(SAMPLE, &MOX).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description(), "STARBUCKS CENTRAL");
        assert_eq!(out.records[0].amount(), -45.60);
        assert_eq!(out.rejected_count(Rejection::Excluded), 2);
        assert_eq!(out.rejected_count(Rejection::BelowFloor), 1);
    }

    #[test]
    fn test_unsuffixed_amount_is_not_matched() {
        let out = parse_signed_scan_text("06 Jan 2025 TRANSFER -300.00", &ZA_BANK).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rejected, vec![Rejection::NoAmount]);
    }
}
