//! Fund domain errors

use thiserror::Error;

/// Errors that can occur in the fund domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FundError {
    #[error("Transaction data belongs to multiple contracts: expected '{expected}', found '{found}'")]
    ContractMismatch { expected: String, found: String },

    #[error("Units or amount of a ledger entry exceed the decimal range")]
    EntryOutOfRange,

    #[error("Ledger totals of '{owner}' would exceed the decimal range")]
    TotalsOutOfRange { owner: String },
}
