//! Record parsing errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while parsing a transaction record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The record does not have the shape its transaction type requires
    #[error("Malformed transaction record: {0}")]
    MalformedRecord(String),

    /// The record's transaction code has no known layout
    #[error("Unsupported transaction type: {0}")]
    UnsupportedTransactionType(String),
}

impl IngestError {
    /// A required field is absent or null
    pub fn missing(field: &str) -> Self {
        IngestError::MalformedRecord(format!("missing field '{}'", field))
    }

    /// A field holds a value of the wrong JSON type
    pub fn wrong_type(field: &str, expected: &str) -> Self {
        IngestError::MalformedRecord(format!("field '{}' is not {}", field, expected))
    }

    /// A field holds text that cannot be converted
    pub fn invalid(field: &str, source: CoreError) -> Self {
        IngestError::MalformedRecord(format!("invalid field '{}': {}", field, source))
    }

    /// Units or amounts of an entry cannot be represented as decimals
    pub fn out_of_range(path: &str) -> Self {
        IngestError::MalformedRecord(format!("amounts of '{}' exceed the decimal range", path))
    }
}
