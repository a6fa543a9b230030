//! Transaction directory processing
//!
//! The policy administration system exports one JSON document per
//! transaction. A run reads every such document below one directory,
//! parses it and folds the result into a single contract.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use domain_fund::{Contract, HistoryMerger};
use domain_ingest::parse_record;

use crate::error::SourceError;

/// Extension of transaction record files, matched case-insensitively
pub const TRANSACTION_FILE_EXTENSION: &str = ".json";

/// A file left out of the run, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of ingesting a transaction directory
#[derive(Debug)]
pub struct IngestionOutcome {
    /// The merged contract; `None` if no file could be used
    pub contract: Option<Contract>,
    /// Number of files merged into the contract
    pub processed_files: usize,
    /// Files that failed to read or parse, in processing order
    pub skipped_files: Vec<SkippedFile>,
}

impl IngestionOutcome {
    /// One human-readable line per skipped file
    pub fn warnings(&self) -> Vec<String> {
        self.skipped_files
            .iter()
            .map(|skipped| format!("skipped '{}': {}", skipped.path.display(), skipped.reason))
            .collect()
    }
}

/// Reads every transaction record below a directory into one contract
#[derive(Debug, Clone)]
pub struct TransactionHistoryProcessor {
    directory: PathBuf,
}

impl TransactionHistoryProcessor {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Lists the transaction files below the directory in sorted path order
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if a directory cannot be listed
    pub fn transaction_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();
        collect_transaction_files(&self.directory, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Parses and merges every transaction file
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    ///
    /// # Errors
    ///
    /// - `SourceError::Io` if the directory cannot be listed
    /// - `SourceError::Fund` if the files belong to more than one contract
    pub fn process(&self) -> Result<IngestionOutcome, SourceError> {
        info!(directory = %self.directory.display(), "Reading transaction data");

        let mut merger = HistoryMerger::new();
        let mut skipped_files = Vec::new();

        for path in self.transaction_files()? {
            let merged = parse_file(&path)
                .and_then(|contract| merger.absorb(contract).map_err(SourceError::from));

            match merged {
                Ok(()) => debug!(file = %path.display(), "Processed transaction data file"),
                Err(err) if err.is_run_fatal() => {
                    error!(file = %path.display(), error = %err, "Transaction data belongs to another contract");
                    return Err(err);
                }
                Err(err) => {
                    error!(file = %path.display(), error = %err, "Cannot process transaction data file");
                    skipped_files.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let processed_files = merger.absorbed_count();
        info!(
            processed = processed_files,
            skipped = skipped_files.len(),
            "Transaction data read"
        );

        Ok(IngestionOutcome {
            contract: merger.into_contract(),
            processed_files,
            skipped_files,
        })
    }
}

/// Reads and parses one transaction file
///
/// # Errors
///
/// - `SourceError::Io` if the file cannot be read
/// - `SourceError::Json` if it is not valid JSON
/// - `SourceError::Ingest` if the record cannot be mapped
pub fn parse_file(path: &Path) -> Result<Contract, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::io(path, source))?;
    let record: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| SourceError::json(path, source))?;
    Ok(parse_record(&record)?)
}

/// Collects transaction files below `directory`
///
/// Symbolic links to files are read, links to directories are not followed.
fn collect_transaction_files(directory: &Path, files: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    let entries = fs::read_dir(directory).map_err(|source| SourceError::io(directory, source))?;

    for entry in entries {
        let entry = entry.map_err(|source| SourceError::io(directory, source))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| SourceError::io(&path, source))?;

        if file_type.is_dir() {
            collect_transaction_files(&path, files)?;
        } else if is_transaction_file(&path) && (file_type.is_file() || (file_type.is_symlink() && path.is_file())) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_transaction_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(TRANSACTION_FILE_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(is_transaction_file(Path::new("data/B522-1.json")));
        assert!(is_transaction_file(Path::new("data/B522-1.JSON")));
        assert!(!is_transaction_file(Path::new("data/B522-1.json.bak")));
        assert!(!is_transaction_file(Path::new("data/notes.txt")));
    }
}
