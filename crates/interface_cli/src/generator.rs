//! Fund report pipeline
//!
//! A run ingests the transaction directory, loads the published rates, values
//! every fund and writes the JSON report. Progress is reported through a
//! callback at fixed milestones and a shared flag lets the caller cancel the
//! run between stages.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{info, warn};

use core_kernel::RunId;
use domain_fund::{ContractValuation, RateSource, RateTable, ReportSink, ValuationEngine};
use infra_fs::{JsonReportSink, RateFile, SourceError, TransactionHistoryProcessor};

use crate::config::ReportConfig;

/// Progress once the transaction records are merged
pub const TRANSACTIONS_PARSED_PROGRESS: u8 = 20;
/// Progress once the rates are loaded
pub const RATES_PROVIDED_PROGRESS: u8 = 50;
/// Progress once the run has finished
pub const COMPLETE_PROGRESS: u8 = 100;

/// Errors that abort a report run
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A written report
#[derive(Debug)]
pub struct GeneratedReport {
    pub run_id: RunId,
    pub report_path: PathBuf,
    /// Skipped files, the rate source failure if any, then missing rates
    pub warnings: Vec<String>,
    pub valuation: ContractValuation,
    pub processed_files: usize,
}

/// How a run ended
#[derive(Debug)]
pub enum GenerationOutcome {
    Completed(GeneratedReport),
    /// No transaction record could be used
    NoData,
    Cancelled,
}

/// Runs the report pipeline for one configuration
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Runs the pipeline, naming the report after the current local time
    pub fn generate<F>(&self, progress: F, cancel: &AtomicBool) -> Result<GenerationOutcome, GeneratorError>
    where
        F: FnMut(u8),
    {
        self.generate_at(Local::now().naive_local(), progress, cancel)
    }

    /// Runs the pipeline, naming the report after `now`
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Source` if the transaction directory cannot
    /// be listed, the records belong to more than one contract, or the
    /// report cannot be written. A rate file that cannot be loaded only
    /// adds a warning.
    pub fn generate_at<F>(
        &self,
        now: NaiveDateTime,
        mut progress: F,
        cancel: &AtomicBool,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        F: FnMut(u8),
    {
        let run_id = RunId::new();
        info!(%run_id, directory = %self.config.transaction_dir.display(), "Generating fund report");

        let ingestion = TransactionHistoryProcessor::new(&self.config.transaction_dir).process()?;
        let mut warnings = ingestion.warnings();
        let processed_files = ingestion.processed_files;

        let mut contract = match ingestion.contract {
            Some(contract) if !contract.is_empty() => contract,
            _ => {
                info!(%run_id, "No transaction data found");
                progress(COMPLETE_PROGRESS);
                return Ok(GenerationOutcome::NoData);
            }
        };
        if is_cancelled(cancel, &run_id) {
            return Ok(GenerationOutcome::Cancelled);
        }
        progress(TRANSACTIONS_PARSED_PROGRESS);

        let rates = match &self.config.rate_file {
            Some(path) => load_rates(&RateFile::new(path), &mut warnings),
            None => {
                info!(%run_id, "No rate file configured");
                RateTable::unavailable()
            }
        };
        if is_cancelled(cancel, &run_id) {
            return Ok(GenerationOutcome::Cancelled);
        }
        progress(RATES_PROVIDED_PROGRESS);

        let valuation = ValuationEngine::new(&rates).value(&mut contract);
        warnings.extend(valuation.warnings.iter().cloned());
        if is_cancelled(cancel, &run_id) {
            return Ok(GenerationOutcome::Cancelled);
        }

        let report_path = self.config.report_path(now);
        JsonReportSink::new(&report_path).write(&contract, &valuation)?;
        progress(COMPLETE_PROGRESS);

        info!(
            %run_id,
            contract_id = %contract.id(),
            report = %report_path.display(),
            warnings = warnings.len(),
            "Fund report generated"
        );

        Ok(GenerationOutcome::Completed(GeneratedReport {
            run_id,
            report_path,
            warnings,
            valuation,
            processed_files,
        }))
    }
}

/// Loads rates from a source, degrading to an unavailable table on failure
fn load_rates<S: RateSource>(source: &S, warnings: &mut Vec<String>) -> RateTable {
    match source.load_rates() {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "Cannot load exchange rates");
            warnings.push(format!("exchange rates unavailable: {}", err));
            RateTable::unavailable()
        }
    }
}

fn is_cancelled(cancel: &AtomicBool, run_id: &RunId) -> bool {
    let cancelled = cancel.load(Ordering::SeqCst);
    if cancelled {
        info!(%run_id, "Fund report generation cancelled");
    }
    cancelled
}
