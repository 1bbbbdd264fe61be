//! Known statement issuers and filename-based detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statement issuers this tool knows by name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Institution {
    #[serde(rename = "hsbc")]
    Hsbc,
    #[serde(rename = "sc_credit")]
    ScCredit,
    #[serde(rename = "earnmore")]
    EarnMore,
    #[serde(rename = "welab")]
    WeLab,
    #[serde(rename = "za_bank")]
    ZaBank,
    #[serde(rename = "za_credit")]
    ZaCredit,
    #[serde(rename = "mox")]
    Mox,
    #[serde(rename = "futu")]
    Futu,
    #[serde(rename = "webull")]
    Webull,
    #[serde(rename = "ibkr")]
    Ibkr,
}

impl Institution {
    pub const ALL: [Institution; 10] = [
        Institution::Hsbc,
        Institution::ScCredit,
        Institution::EarnMore,
        Institution::WeLab,
        Institution::ZaBank,
        Institution::ZaCredit,
        Institution::Mox,
        Institution::Futu,
        Institution::Webull,
        Institution::Ibkr,
    ];

    /// Stable identifier, used in console output and config files
    pub fn id(&self) -> &'static str {
        match self {
            Institution::Hsbc => "hsbc",
            Institution::ScCredit => "sc_credit",
            Institution::EarnMore => "earnmore",
            Institution::WeLab => "welab",
            Institution::ZaBank => "za_bank",
            Institution::ZaCredit => "za_credit",
            Institution::Mox => "mox",
            Institution::Futu => "futu",
            Institution::Webull => "webull",
            Institution::Ibkr => "ibkr",
        }
    }

    /// Account label written to the output
    pub fn label(&self) -> &'static str {
        match self {
            Institution::Hsbc => "HSBC",
            Institution::ScCredit => "SC Credit",
            Institution::EarnMore => "EarnMore",
            Institution::WeLab => "WeLab",
            Institution::ZaBank => "ZA Bank",
            Institution::ZaCredit => "ZA Credit",
            Institution::Mox => "Mox",
            Institution::Futu => "FUTU",
            Institution::Webull => "Webull",
            Institution::Ibkr => "IBKR",
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown institution id: {0}")]
pub struct UnknownInstitution(pub String);

impl FromStr for Institution {
    type Err = UnknownInstitution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Institution::ALL
            .into_iter()
            .find(|i| i.id() == wanted)
            .ok_or_else(|| UnknownInstitution(s.to_string()))
    }
}

/// Outcome of filename detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Known(Institution),
    Unknown,
}

impl Detection {
    pub fn institution(&self) -> Option<Institution> {
        match self {
            Detection::Known(i) => Some(*i),
            Detection::Unknown => None,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Known(i) => write!(f, "{i}"),
            Detection::Unknown => f.write_str("unknown"),
        }
    }
}

/// Classify a statement by its file name.
///
/// Checks run in a fixed order; "za" + "bank" must be tested before the
/// bare "za" fallback so ZA Bank statements never land on ZA Credit.
pub fn detect(filename: &str) -> Detection {
    let fn_lower = filename.to_lowercase();
    let has = |needle: &str| fn_lower.contains(needle);

    let institution = if has("hsbc") {
        Institution::Hsbc
    } else if has("sc_") || has("sc credit") {
        Institution::ScCredit
    } else if has("earnmore") {
        Institution::EarnMore
    } else if has("welab") {
        Institution::WeLab
    } else if has("za") && has("bank") {
        Institution::ZaBank
    } else if has("za") {
        Institution::ZaCredit
    } else if has("mox") {
        Institution::Mox
    } else if has("futu") {
        Institution::Futu
    } else if has("webull") {
        Institution::Webull
    } else if has("ibkr") {
        Institution::Ibkr
    } else {
        return Detection::Unknown;
    };

    Detection::Known(institution)
}
