//! tally-core: transaction record and institution detection shared by the
//! statement extractors

pub mod institution;
pub mod transaction;

pub use institution::{detect, Detection, Institution, UnknownInstitution};
pub use transaction::{InvalidTransaction, Transaction, TxnType, DESCRIPTION_MAX, VENDOR_MAX};
