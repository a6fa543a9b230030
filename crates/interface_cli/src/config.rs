//! Report generator configuration

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Prefix of the environment variables read by [`ReportConfig::from_env`]
pub const ENV_PREFIX: &str = "FUND_REPORT";

/// Timestamp format of generated report file names
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Report generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Directory holding the exported transaction records
    #[serde(default = "default_transaction_dir")]
    pub transaction_dir: PathBuf,
    /// Property file with the published unit rates
    #[serde(default)]
    pub rate_file: Option<PathBuf>,
    /// Directory the report is written to; the transaction directory if unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_transaction_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            transaction_dir: default_transaction_dir(),
            rate_file: None,
            output_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl ReportConfig {
    /// Loads configuration from `FUND_REPORT_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Returns the path of the report generated at `now`
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use interface_cli::config::ReportConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = ReportConfig {
    ///     transaction_dir: PathBuf::from("data"),
    ///     ..ReportConfig::default()
    /// };
    /// let now = NaiveDate::from_ymd_opt(2019, 1, 31).unwrap().and_hms_opt(8, 5, 9).unwrap();
    /// assert_eq!(config.report_path(now), PathBuf::from("data/results-20190131-080509.json"));
    /// ```
    pub fn report_path(&self, now: NaiveDateTime) -> PathBuf {
        let directory = self.output_dir.as_ref().unwrap_or(&self.transaction_dir);
        directory.join(format!("results-{}.json", now.format(REPORT_TIMESTAMP_FORMAT)))
    }
}
