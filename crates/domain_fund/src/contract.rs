//! Contract aggregate
//!
//! One `Contract` is built per ingestion run. Its header comes from the first
//! parsed record; every record after that only contributes ledger entries.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use core_kernel::ContractId;

use crate::error::FundError;
use crate::fund_history::FundHistory;
use crate::history_element::HistoryElement;

/// Header data of a unit-linked insurance contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetails {
    /// Marketing name of the contract
    pub name: Option<String>,
    /// Product type number
    pub contract_type: String,
    /// Product type display name
    pub type_name: Option<String>,
    /// Native currency of the contract
    pub currency: String,
    /// Current value as reported by the insurer
    pub actual_value: Option<Decimal>,
    /// Surrender value as reported by the insurer
    pub surrender_value: Option<Decimal>,
    /// Premium currently due
    pub due_amount: Option<Decimal>,
    /// Date premiums are paid up to
    pub paid_to_date: Option<String>,
}

impl ContractDetails {
    /// Creates contract details with the mandatory fields only
    pub fn new(contract_type: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            name: None,
            contract_type: contract_type.into(),
            type_name: None,
            currency: currency.into(),
            actual_value: None,
            surrender_value: None,
            due_amount: None,
            paid_to_date: None,
        }
    }

    /// Sets the contract name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The top-level aggregate for one policy
///
/// # Invariants
///
/// - The contract id never changes after construction
/// - Fund histories are unique by fund name
/// - The sum of the absolute amounts across all funds is within the decimal
///   range, so totals across funds cannot overflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    id: ContractId,
    details: ContractDetails,
    fund_histories: BTreeMap<String, FundHistory>,
    gross_amount: Decimal,
}

impl Contract {
    /// Creates a contract without any fund history
    pub fn new(id: ContractId, details: ContractDetails) -> Self {
        Self {
            id,
            details,
            fund_histories: BTreeMap::new(),
            gross_amount: Decimal::ZERO,
        }
    }

    pub fn id(&self) -> &ContractId {
        &self.id
    }

    pub fn details(&self) -> &ContractDetails {
        &self.details
    }

    /// Fund histories ordered by fund name
    pub fn fund_histories(&self) -> impl Iterator<Item = &FundHistory> {
        self.fund_histories.values()
    }

    /// Mutable access to the fund histories, ordered by fund name
    pub fn fund_histories_mut(&mut self) -> impl Iterator<Item = &mut FundHistory> {
        self.fund_histories.values_mut()
    }

    /// Looks up the history of a fund by its exact name
    pub fn fund(&self, fund_name: &str) -> Option<&FundHistory> {
        self.fund_histories.get(fund_name)
    }

    pub fn fund_count(&self) -> usize {
        self.fund_histories.len()
    }

    /// Returns true if no ledger entry has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.fund_histories.is_empty()
    }

    /// Records a ledger entry against a fund
    ///
    /// Appends to the fund's history if one exists (filling in a missing
    /// fund code), otherwise starts a new history with the given code.
    ///
    /// # Arguments
    ///
    /// * `fund_name` - Name of the fund, matched exactly
    /// * `fund_code` - Fund code reported alongside the entry, if any
    /// * `element` - The ledger entry
    ///
    /// # Errors
    ///
    /// Returns `FundError::TotalsOutOfRange` if the fund's or the contract's
    /// totals would leave the decimal range; the contract is left untouched
    pub fn add_to_fund(
        &mut self,
        fund_name: &str,
        fund_code: Option<&str>,
        element: HistoryElement,
    ) -> Result<(), FundError> {
        let gross_amount = self.grown_gross_amount(element.sum_amount().abs())?;

        match self.fund_histories.get_mut(fund_name) {
            Some(history) => {
                history.push(element)?;
                history.backfill_fund_code(fund_code);
            }
            None => {
                let history = FundHistory::new(fund_name, fund_code.map(str::to_string), element);
                self.fund_histories.insert(fund_name.to_string(), history);
            }
        }

        self.gross_amount = gross_amount;
        Ok(())
    }

    /// Checks that every fund of `source` can be folded into this contract
    pub(crate) fn check_absorb(&self, source: &Contract) -> Result<(), FundError> {
        self.grown_gross_amount(source.gross_amount)?;
        for history in source.fund_histories() {
            if let Some(existing) = self.fund_histories.get(history.fund_name()) {
                existing.check_absorb(history)?;
            }
        }
        Ok(())
    }

    /// Adopts a whole fund history, folding it into an existing one of the same name
    pub(crate) fn absorb_fund(&mut self, history: FundHistory) -> Result<(), FundError> {
        let gross_amount = self.grown_gross_amount(history.gross_amount())?;

        match self.fund_histories.get_mut(history.fund_name()) {
            Some(existing) => existing.absorb(history)?,
            None => {
                self.fund_histories.insert(history.fund_name().to_string(), history);
            }
        }

        self.gross_amount = gross_amount;
        Ok(())
    }

    fn grown_gross_amount(&self, amount: Decimal) -> Result<Decimal, FundError> {
        self.gross_amount
            .checked_add(amount)
            .ok_or_else(|| FundError::TotalsOutOfRange {
                owner: self.id.to_string(),
            })
    }

    /// Consumes the contract, yielding its fund histories
    pub(crate) fn into_fund_histories(self) -> impl Iterator<Item = FundHistory> {
        self.fund_histories.into_values()
    }
}
