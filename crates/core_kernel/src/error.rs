//! Core error types used across the workspace

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid decimal value: '{0}'")]
    InvalidDecimal(String),

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),
}

impl CoreError {
    pub fn invalid_decimal(raw: impl Into<String>) -> Self {
        CoreError::InvalidDecimal(raw.into())
    }

    pub fn invalid_date(raw: impl Into<String>) -> Self {
        CoreError::InvalidDate(raw.into())
    }
}
