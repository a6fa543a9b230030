//! Fund Report - Command-Line Binary
//!
//! Reads the exported transaction records of one contract, values its funds
//! against a rate file and writes `results-<timestamp>.json`.
//!
//! # Usage
//!
//! ```bash
//! # Value the records in the current directory without rates
//! cargo run --bin fund-report
//!
//! # Explicit transaction directory and rate file
//! cargo run --bin fund-report -- ./transactions ./rates.xml
//!
//! # Or through the environment
//! FUND_REPORT_TRANSACTION_DIR=./transactions FUND_REPORT_RATE_FILE=./rates.xml cargo run --bin fund-report
//! ```
//!
//! # Environment Variables
//!
//! * `FUND_REPORT_TRANSACTION_DIR` - Directory with the transaction records (default: .)
//! * `FUND_REPORT_RATE_FILE` - Rate property file (optional)
//! * `FUND_REPORT_OUTPUT_DIR` - Report directory (default: the transaction directory)
//! * `FUND_REPORT_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use interface_cli::{GenerationOutcome, ReportConfig, ReportGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the report generator.
///
/// Loads configuration, initializes logging and runs one report on a
/// blocking worker. Ctrl+C cancels the run at the next stage boundary.
///
/// # Errors
///
/// Returns an error if the transaction directory cannot be read, the
/// records belong to more than one contract, or the report cannot be written
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config(std::env::args().skip(1).collect());

    init_tracing(&config.log_level);

    tracing::info!(
        transaction_dir = %config.transaction_dir.display(),
        rate_file = ?config.rate_file,
        "Starting fund report"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let generator = ReportGenerator::new(config);

    let worker_cancel = Arc::clone(&cancel);
    let mut worker = tokio::task::spawn_blocking(move || {
        generator.generate(
            |percent| tracing::info!(progress = percent, "Report progress"),
            &worker_cancel,
        )
    });

    let result = tokio::select! {
        result = &mut worker => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, cancelling report generation");
            cancel.store(true, Ordering::SeqCst);
            worker.await
        }
    };

    match result.context("report worker failed")?.context("report generation failed")? {
        GenerationOutcome::Completed(report) => {
            for warning in &report.warnings {
                tracing::warn!(run_id = %report.run_id, "{}", warning);
            }
            tracing::info!(
                run_id = %report.run_id,
                report = %report.report_path.display(),
                files = report.processed_files,
                funds = report.valuation.summaries.len(),
                "Report complete"
            );
        }
        GenerationOutcome::NoData => tracing::info!("No transaction data, no report written"),
        GenerationOutcome::Cancelled => tracing::warn!("Report generation cancelled"),
    }

    Ok(())
}

/// Loads report configuration from the environment and the command line.
///
/// Falls back to defaults if the environment cannot be deserialized. The
/// first positional argument overrides the transaction directory, the second
/// the rate file.
fn load_config(args: Vec<String>) -> ReportConfig {
    let mut config = ReportConfig::from_env().unwrap_or_else(|_| ReportConfig {
        log_level: std::env::var("FUND_REPORT_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
        ..ReportConfig::default()
    });

    let mut args = args.into_iter();
    if let Some(transaction_dir) = args.next() {
        config.transaction_dir = PathBuf::from(transaction_dir);
    }
    if let Some(rate_file) = args.next() {
        config.rate_file = Some(PathBuf::from(rate_file));
    }

    config
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
