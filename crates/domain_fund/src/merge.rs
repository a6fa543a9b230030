//! History merging
//!
//! Every source file is parsed into its own `Contract`. The merger folds
//! those partial contracts into one, refusing to mix data of different
//! contracts.

use tracing::debug;

use crate::contract::Contract;
use crate::error::FundError;

/// Merges the fund histories of `source` into `target`
///
/// Funds unknown to `target` are adopted wholesale. For funds present in
/// both, the source elements are appended and a missing fund code is filled
/// in from the source.
///
/// # Errors
///
/// - `FundError::ContractMismatch` if the two contracts have different ids
/// - `FundError::TotalsOutOfRange` if the merged totals would leave the
///   decimal range
///
/// `target` is left untouched on error.
pub fn merge_contracts(target: &mut Contract, source: Contract) -> Result<(), FundError> {
    if target.id() != source.id() {
        return Err(FundError::ContractMismatch {
            expected: target.id().to_string(),
            found: source.id().to_string(),
        });
    }

    target.check_absorb(&source)?;
    for history in source.into_fund_histories() {
        target.absorb_fund(history)?;
    }

    Ok(())
}

/// Running fold of parsed contracts into one
///
/// The first absorbed contract becomes the target, including its header
/// data; later ones only contribute fund histories.
#[derive(Debug, Default)]
pub struct HistoryMerger {
    contract: Option<Contract>,
    absorbed: usize,
}

impl HistoryMerger {
    /// Creates an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a parsed contract into the running one
    ///
    /// # Errors
    ///
    /// - `FundError::ContractMismatch` if the contract belongs to a
    ///   different policy than the ones absorbed so far
    /// - `FundError::TotalsOutOfRange` if the merged totals would leave the
    ///   decimal range
    pub fn absorb(&mut self, contract: Contract) -> Result<(), FundError> {
        match self.contract.as_mut() {
            Some(target) => merge_contracts(target, contract)?,
            None => {
                debug!(contract_id = %contract.id(), "Contract header taken from first record");
                self.contract = Some(contract);
            }
        }
        self.absorbed += 1;
        Ok(())
    }

    /// Number of contracts absorbed so far
    pub fn absorbed_count(&self) -> usize {
        self.absorbed
    }

    /// Finishes the fold; `None` if nothing was absorbed
    pub fn into_contract(self) -> Option<Contract> {
        self.contract
    }
}
