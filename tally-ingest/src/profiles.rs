//! Per-institution layout parameters and the institution → strategy table.

use std::path::Path;

use anyhow::Result;
use tally_core::Institution;

use crate::document::{DocumentReader, join_pages};
use crate::parsers::{
    ActivityProfile, LineScanProfile, SignedScanProfile, TableScanProfile, parse_activity_text,
    parse_line_scan_text, parse_signed_scan_text, parse_table_rows,
};
use crate::types::Extraction;

const HKD: &str = "HKD";

const CJK_MONTH_DAY: &str = r"\d{1,2}月\d{1,2}日";
const DAY_MON_YEAR: &str = r"^(\d{1,2}\s+[A-Za-z]{3}\s+\d{4})";

pub static HSBC: LineScanProfile = LineScanProfile {
    account: "HSBC",
    currency: HKD,
    date_pattern: r"^(\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*)\s",
    noise_markers: &["BALANCE", "RELATIONSHIP", "SAVINGS", "FOREIGN", "CCY", "TOTAL"],
    keywords: &[
        "SALARY",
        "ATM",
        "FUTU",
        "WEBULL",
        "OGILVY",
        "KREW",
        "DBS",
        "INTERACTIVE",
        "CHAPS",
        "NC",
        "HC",
        "WONG LIK",
        "TRANSFER",
        "CREDIT INTEREST",
    ],
    credit_keywords: &["SALARY", "KREW", "OGILVY"],
    debit_marker: "DEBIT",
    noise_floor: 100.0,
};

const fn card_table(account: &'static str) -> TableScanProfile {
    TableScanProfile {
        account,
        currency: HKD,
        date_pattern: CJK_MONTH_DAY,
        exclusion_markers: &["P2*"],
        noise_floor: 100.0,
    }
}

pub static SC_CREDIT: TableScanProfile = card_table("SC Credit");
pub static EARNMORE: TableScanProfile = card_table("EarnMore");
pub static WELAB: TableScanProfile = card_table("WeLab");
pub static ZA_CREDIT: TableScanProfile = card_table("ZA Credit");

pub static ZA_BANK: SignedScanProfile = SignedScanProfile {
    account: "ZA Bank",
    currency: HKD,
    date_pattern: DAY_MON_YEAR,
    debits_only: false,
    noise_floor: 0.0,
};

pub static MOX: SignedScanProfile = SignedScanProfile {
    account: "Mox",
    currency: HKD,
    date_pattern: DAY_MON_YEAR,
    debits_only: true,
    noise_floor: 10.0,
};

pub static FUTU: ActivityProfile = ActivityProfile {
    account: "FUTU",
    currency: HKD,
    actions: &["Deposit", "Withdraw", "Buy", "Sell"],
    deposit_action: "Deposit",
};

pub static WEBULL: ActivityProfile = ActivityProfile {
    account: "Webull",
    currency: HKD,
    actions: &["Deposit", "Withdraw", "Buy", "Sell", "Options"],
    deposit_action: "Deposit",
};

/// Which content a strategy consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Tables,
}

/// An extractor family bound to one institution's parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    LineScan(&'static LineScanProfile),
    TableScan(&'static TableScanProfile),
    SignedScan(&'static SignedScanProfile),
    Activity(&'static ActivityProfile),
}

impl Strategy {
    pub fn input_kind(&self) -> InputKind {
        match self {
            Strategy::TableScan(_) => InputKind::Tables,
            Strategy::LineScan(_) | Strategy::SignedScan(_) | Strategy::Activity(_) => {
                InputKind::Text
            }
        }
    }

    /// Run against already-extracted page text
    pub fn run_text(&self, pages: &[String]) -> Result<Extraction> {
        let text = join_pages(pages);
        match self {
            Strategy::LineScan(p) => parse_line_scan_text(&text, p),
            Strategy::SignedScan(p) => parse_signed_scan_text(&text, p),
            Strategy::Activity(p) => parse_activity_text(&text, p),
            Strategy::TableScan(_) => anyhow::bail!("table strategy given page text"),
        }
    }

    /// Read the document through `reader` and extract its transactions.
    pub fn run(&self, reader: &dyn DocumentReader, path: &Path) -> Result<Extraction> {
        match self {
            Strategy::TableScan(p) => parse_table_rows(&reader.read_tables(path)?, p),
            _ => self.run_text(&reader.read_text(path)?),
        }
    }
}

/// Strategy for an institution, or `None` when it is recognized but has no
/// extractor yet.
pub fn strategy_for(institution: Institution) -> Option<Strategy> {
    let strategy = match institution {
        Institution::Hsbc => Strategy::LineScan(&HSBC),
        Institution::ScCredit => Strategy::TableScan(&SC_CREDIT),
        Institution::EarnMore => Strategy::TableScan(&EARNMORE),
        Institution::WeLab => Strategy::TableScan(&WELAB),
        Institution::ZaCredit => Strategy::TableScan(&ZA_CREDIT),
        Institution::ZaBank => Strategy::SignedScan(&ZA_BANK),
        Institution::Mox => Strategy::SignedScan(&MOX),
        Institution::Futu => Strategy::Activity(&FUTU),
        Institution::Webull => Strategy::Activity(&WEBULL),
        Institution::Ibkr => return None,
    };
    Some(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_label_matches_institution() {
        for inst in Institution::ALL {
            let Some(strategy) = strategy_for(inst) else {
                assert_eq!(inst, Institution::Ibkr);
                continue;
            };
            let account = match strategy {
                Strategy::LineScan(p) => p.account,
                Strategy::TableScan(p) => p.account,
                Strategy::SignedScan(p) => p.account,
                Strategy::Activity(p) => p.account,
            };
            assert_eq!(account, inst.label());
        }
    }

    #[test]
    fn test_card_family_shares_one_layout() {
        assert_eq!(strategy_for(Institution::EarnMore).unwrap().input_kind(), InputKind::Tables);
        assert_eq!(SC_CREDIT.date_pattern, WELAB.date_pattern);
        assert_eq!(SC_CREDIT.exclusion_markers, ZA_CREDIT.exclusion_markers);
        assert_ne!(SC_CREDIT.account, EARNMORE.account);
    }

    #[test]
    fn test_table_strategy_rejects_text() {
        let err = Strategy::TableScan(&SC_CREDIT).run_text(&[]).unwrap_err();
        assert!(err.to_string().contains("table strategy"));
    }
}
