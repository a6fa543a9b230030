//! Report output port

use crate::contract::Contract;
use crate::valuation::ContractValuation;

/// Port for writing a valued contract somewhere
///
/// The file system adapter renders a JSON document; tests can collect the
/// reports in memory.
pub trait ReportSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes the report of one contract
    ///
    /// # Arguments
    ///
    /// * `contract` - The merged contract, fund elements sorted by date
    /// * `valuation` - Summaries, totals and warnings of the contract
    fn write(&mut self, contract: &Contract, valuation: &ContractValuation) -> Result<(), Self::Error>;
}
