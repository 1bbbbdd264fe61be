//! Brokerage activity statements (FUTU, Webull)
//!
//! Expected text rows:
//!   2025-01-02 10:30 Deposit 5,000.00
//!   2025-01-03 09:45 Buy 100 TSLA @ 250.00 25,000.00

use anyhow::Result;
use regex::Regex;
use tally_core::{Transaction, TxnType};

use super::parse_amount;
use crate::types::{Extraction, Outcome, Rejection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityProfile {
    pub account: &'static str,
    pub currency: &'static str,
    /// Recognized action keywords, matched in text order
    pub actions: &'static [&'static str],
    /// The one action that moves money in
    pub deposit_action: &'static str,
}

/// One pass per line: ISO date, then an action keyword, then the first amount.
pub fn parse_activity_text(text: &str, profile: &ActivityProfile) -> Result<Extraction> {
    let actions = profile
        .actions
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    let txn_re = Regex::new(&format!(
        r"(?P<date>\d{{4}}-\d{{2}}-\d{{2}}).*?(?P<action>{actions}).*?(?P<amt>[\d,]+\.\d{{2}})"
    ))?;

    let scan = |line: &str| -> Outcome {
        let caps = txn_re.captures(line).ok_or(Rejection::NoAction)?;
        let amount = parse_amount(&caps["amt"])?;
        let action = &caps["action"];

        let kind = if action == profile.deposit_action {
            TxnType::Credit
        } else {
            TxnType::Debit
        };

        Transaction::new(&caps["date"], profile.account, kind, action, amount, profile.currency)
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
    use crate::profiles::{FUTU, WEBULL};

    const SAMPLE: &str = r#"
Account Statement
2025-01-02 10:30 Deposit 5,000.00
2025-01-03 09:45 Buy 100 TSLA @ 250.00 25,000.00
2025-01-04 14:00 Options AAPL 250117C 320.00
2025-01-05 11:11 Withdraw 1,200.50
"#;

    #[test]
    fn test_futu_activity() {
        let out = parse_activity_text(SAMPLE, &FUTU).unwrap();
        assert_eq!(out.records.len(), 3);

        let deposit = &out.records[0];
        assert_eq!(deposit.date(), "2025-01-02");
        assert!(deposit.is_credit());
        assert_eq!(deposit.amount(), 5000.0);
        assert_eq!(deposit.description(), "Deposit");
        assert_eq!(deposit.account(), "FUTU");

        // first decimal after the action keyword, not the trade total
        let buy = &out.records[1];
        assert!(buy.is_debit());
        assert_eq!(buy.amount(), -250.0);

        let withdraw = &out.records[2];
        assert_eq!(withdraw.amount(), -1200.50);
        assert_eq!(out.rejected_count(Rejection::NoAction), 2);
    }

    #[test]
    fn test_webull_includes_options() {
        let out = parse_activity_text(SAMPLE, &WEBULL).unwrap();
        assert_eq!(out.records.len(), 4);
        let options = &out.records[2];
        assert_eq!(options.description(), "Options");
        assert_eq!(options.amount(), -320.0);
        assert_eq!(options.account(), "Webull");
    }

    #[test]
    fn test_zero_deposit_is_zero_amount() {
        let out = parse_activity_text("2025-01-02 10:30 Deposit 0.00", &FUTU).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rejected, vec![Rejection::ZeroAmount]);
    }

    #[test]
    fn test_malformed_amount_does_not_stop_the_scan() {
        // `\d` also matches full-width digits, which do not parse as f64
        let text = "2025-01-02 10:30 Deposit １２３.45\n2025-01-03 09:00 Withdraw 800.00\n";
        let out = parse_activity_text(text, &FUTU).unwrap();
        assert_eq!(out.rejected, vec![Rejection::MalformedAmount]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].date(), "2025-01-03");
        assert_eq!(out.records[0].amount(), -800.0);
    }
}
