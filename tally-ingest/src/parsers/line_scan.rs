//! Free-text statement scanner (HSBC-style layouts)
//!
//! Expected text after PDF-to-text; a date header is carried down to the
//! lines that follow it until the next date appears:
//!   05 Jan   12:00 SALARY PAYMENT OGILVY                 15,234.50
//!            ATM WITHDRAWAL 123456                          1,000.00
//!   07 Jan   BALANCE CARRIED FORWARD                       98,000.00

use anyhow::Result;
use regex::{Regex, RegexBuilder};
use tally_core::{Transaction, TxnType};

use super::parse_amount;
use crate::types::{Extraction, Outcome, Rejection};

/// Recognition rules for one free-text layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineScanProfile {
    pub account: &'static str,
    pub currency: &'static str,
    /// Anchored pattern; capture group 1 is the date token
    pub date_pattern: &'static str,
    /// Lines containing any of these (uppercased) are dropped
    pub noise_markers: &'static [&'static str],
    /// A line needs at least one of these to count as a transaction
    pub keywords: &'static [&'static str],
    pub credit_keywords: &'static [&'static str],
    /// Overrides a credit keyword match
    pub debit_marker: &'static str,
    /// Amounts at or below this are dropped
    pub noise_floor: f64,
}

struct LineScanner<'a> {
    profile: &'a LineScanProfile,
    date_re: Regex,
    amount_re: Regex,
    current_date: Option<String>,
}

impl<'a> LineScanner<'a> {
    fn new(profile: &'a LineScanProfile) -> Result<Self> {
        let date_re = RegexBuilder::new(profile.date_pattern)
            .case_insensitive(true)
            .build()?;
        let amount_re = Regex::new(r"[\d,]+\.\d{2}")?;
        Ok(Self {
            profile,
            date_re,
            amount_re,
            current_date: None,
        })
    }

    fn scan(&mut self, line: &str) -> Outcome {
        if let Some(caps) = self.date_re.captures(line) {
            self.current_date = Some(caps[1].to_string());
        }
        let current_date = self.current_date.as_deref().ok_or(Rejection::NoDate)?;

        let upper = line.to_uppercase();
        let p = self.profile;
        if p.noise_markers.iter().any(|m| upper.contains(m)) {
            return Err(Rejection::Noise);
        }
        if !p.keywords.iter().any(|kw| upper.contains(kw)) {
            return Err(Rejection::NoKeyword);
        }

        let amount_tok = self.amount_re.find(line).ok_or(Rejection::NoAmount)?;
        let amount = parse_amount(amount_tok.as_str())?;
        if amount <= p.noise_floor {
            return Err(Rejection::BelowFloor);
        }

        let desc = line
            .strip_prefix(current_date)
            .map(str::trim_start)
            .unwrap_or(line);
        let desc = match self.amount_re.find(desc) {
            Some(m) => &desc[..m.start()],
            None => desc,
        };

        let is_credit = p.credit_keywords.iter().any(|kw| upper.contains(kw))
            && !upper.contains(p.debit_marker);
        let kind = if is_credit { TxnType::Credit } else { TxnType::Debit };

        Transaction::new(current_date, p.account, kind, desc, amount, p.currency)
            .map_err(Rejection::from)
    }
}

/// Scan the whole statement text line by line.
pub fn parse_line_scan_text(text: &str, profile: &LineScanProfile) -> Result<Extraction> {
    let mut scanner = LineScanner::new(profile)?;
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| scanner.scan(line))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::HSBC;

    #[test]
    fn test_salary_line_is_credit() {
        let out = parse_line_scan_text("05 Jan 12:00 SALARY PAYMENT 15,234.50", &HSBC).unwrap();
        assert_eq!(out.records.len(), 1);
        let txn = &out.records[0];
        assert_eq!(txn.date(), "05 Jan");
        assert!(txn.is_credit());
        assert_eq!(txn.amount(), 15234.50);
        assert!(txn.description().contains("SALARY PAYMENT"));
        assert_eq!(txn.currency(), "HKD");
        assert_eq!(txn.account(), "HSBC");
    }

    #[test]
    fn test_date_carries_to_following_lines() {
        let text = r#"
Statement of account
03 Feb ATM WITHDRAWAL 0042 1,000.00
FUTU SECURITIES TRANSFER 20,000.00
05 Feb KREW LTD PAYROLL 30,000.00
"#;
        let out = parse_line_scan_text(text, &HSBC).unwrap();
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].date(), "03 Feb");
        assert_eq!(out.records[0].description(), "ATM WITHDRAWAL 0042");
        assert_eq!(out.records[0].amount(), -1000.0);
        assert_eq!(out.records[1].date(), "03 Feb");
        assert_eq!(out.records[1].amount(), -20000.0);
        assert_eq!(out.records[2].date(), "05 Feb");
        assert!(out.records[2].is_credit());
        assert_eq!(out.rejected_count(Rejection::NoDate), 1);
    }

    #[test]
    fn test_noise_floor_and_markers() {
        let text = r#"
10 Mar ATM FEE 5.00
10 Mar BALANCE CARRIED FORWARD TRANSFER 9,999.00
10 Mar GROCERY STORE 450.00
"#;
        let out = parse_line_scan_text(text, &HSBC).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rejected_count(Rejection::BelowFloor), 1);
        assert_eq!(out.rejected_count(Rejection::Noise), 1);
        assert_eq!(out.rejected_count(Rejection::NoKeyword), 1);
    }

    #[test]
    fn test_debit_marker_overrides_credit_keyword() {
        let out = parse_line_scan_text("12 Apr SALARY DEBIT ADJUSTMENT 2,000.00", &HSBC).unwrap();
        assert_eq!(out.records.len(), 1);
        assert!(out.records[0].is_debit());
        assert_eq!(out.records[0].amount(), -2000.0);
    }

    #[test]
    fn test_keyword_without_amount() {
        let out = parse_line_scan_text("12 Apr SALARY PAYMENT PENDING", &HSBC).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rejected, vec![Rejection::NoAmount]);
    }

    #[test]
    fn test_description_too_short() {
        // Only the two-letter keyword survives stripping.
        let out = parse_line_scan_text("12 Apr NC 2,000.00", &HSBC).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rejected, vec![Rejection::ShortDescription]);
    }

    #[test]
    fn test_full_month_name_and_case() {
        let out = parse_line_scan_text("5 january salary 7,000.00", &HSBC).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].date(), "5 january");
        assert_eq!(out.records[0].description(), "salary");
    }
}
