//! Extractor families. Each family is one parsing routine; the
//! per-institution differences live in its profile struct.

pub mod activity;
pub mod line_scan;
pub mod signed_scan;
pub mod table_scan;

pub use activity::{ActivityProfile, parse_activity_text};
pub use line_scan::{LineScanProfile, parse_line_scan_text};
pub use signed_scan::{SignedScanProfile, parse_signed_scan_text};
pub use table_scan::{TableScanProfile, parse_table_rows};

use crate::types::Rejection;

/// Parse a statement amount such as `15,234.50`
pub(crate) fn parse_amount(raw: &str) -> Result<f64, Rejection> {
    let cleaned = raw.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Rejection::MalformedAmount),
    }
}
