//! File System Infrastructure Layer
//!
//! This crate connects the fund ledger to the file system: it reads the
//! exported transaction records of one contract, loads published unit rates
//! from a property file and writes the valued contract as a JSON report.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_fund::{RateSource, ReportSink, ValuationEngine};
//! use infra_fs::{JsonReportSink, RateFile, TransactionHistoryProcessor};
//!
//! let outcome = TransactionHistoryProcessor::new("transactions").process()?;
//! let rates = RateFile::new("rates.xml").load_rates()?;
//! if let Some(mut contract) = outcome.contract {
//!     let valuation = ValuationEngine::new(&rates).value(&mut contract);
//!     JsonReportSink::new("results.json").write(&contract, &valuation)?;
//! }
//! ```

pub mod error;
pub mod processor;
pub mod rate_file;
pub mod report;

pub use error::SourceError;
pub use processor::{parse_file, IngestionOutcome, SkippedFile, TransactionHistoryProcessor};
pub use rate_file::{RateFile, RATES_DATE_KEY};
pub use report::{JsonReportSink, ReportDocument};
