//! Command-Line Interface Layer
//!
//! This crate drives a fund report run from the command line.
//!
//! # Architecture
//!
//! - **Config**: `FUND_REPORT_*` environment configuration
//! - **Generator**: ingest, load rates, value and write the report, with
//!   progress milestones and cooperative cancellation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use interface_cli::{GenerationOutcome, ReportConfig, ReportGenerator};
//!
//! let generator = ReportGenerator::new(ReportConfig::from_env()?);
//! let cancel = AtomicBool::new(false);
//! if let GenerationOutcome::Completed(report) = generator.generate(|_| {}, &cancel)? {
//!     println!("{}", report.report_path.display());
//! }
//! ```

pub mod config;
pub mod generator;

pub use config::ReportConfig;
pub use generator::{
    GeneratedReport, GenerationOutcome, GeneratorError, ReportGenerator, COMPLETE_PROGRESS,
    RATES_PROVIDED_PROGRESS, TRANSACTIONS_PARSED_PROGRESS,
};
