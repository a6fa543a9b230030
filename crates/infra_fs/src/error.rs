//! File system adapter error types
//!
//! This module defines the errors raised while reading transaction records
//! and rate files or writing reports, keeping the offending path attached.

use std::path::{Path, PathBuf};

use thiserror::Error;

use domain_fund::FundError;
use domain_ingest::IngestError;

/// Errors that can occur in the file system adapters
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading or writing a file failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transaction file is not valid JSON, or a report could not be serialized
    #[error("JSON error in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be mapped onto the ledger
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Parsed data could not be merged into the contract
    #[error(transparent)]
    Fund(#[from] FundError),

    /// A rate file has content that cannot be used
    #[error("Invalid rate file '{}': {message}", .path.display())]
    RateFile { path: PathBuf, message: String },

    /// A rate file is not well-formed XML
    #[error("XML error in '{}': {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
}

impl SourceError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        SourceError::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn rate_file(path: &Path, message: impl Into<String>) -> Self {
        SourceError::RateFile {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Returns true if the error must abort the whole run
    ///
    /// Only data of a second contract is fatal; every other failure affects
    /// a single file, which is skipped.
    pub fn is_run_fatal(&self) -> bool {
        matches!(self, SourceError::Fund(FundError::ContractMismatch { .. }))
    }
}
