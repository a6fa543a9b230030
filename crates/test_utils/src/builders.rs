//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::ContractId;
use domain_fund::{Contract, ContractDetails, HistoryElement};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{TemporalFixtures, CONTRACT_ID};

/// Builder for constructing ledger entries
pub struct HistoryElementBuilder {
    transaction_name: String,
    transaction_code: Option<String>,
    transaction_date: NaiveDate,
    initial_units: Option<Decimal>,
    accumulation_units: Option<Decimal>,
    rate: Decimal,
    price_date: String,
}

impl Default for HistoryElementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryElementBuilder {
    /// Creates a builder for a one-unit regular premium at rate 1
    pub fn new() -> Self {
        Self {
            transaction_name: "Rendszeres díj".to_string(),
            transaction_code: Some("B522".to_string()),
            transaction_date: TemporalFixtures::first_premium(),
            initial_units: Some(dec!(1)),
            accumulation_units: None,
            rate: dec!(1),
            price_date: "2018.01.16".to_string(),
        }
    }

    /// Sets the transaction name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.transaction_name = name.into();
        self
    }

    /// Sets the transaction code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.transaction_code = Some(code.into());
        self
    }

    /// Removes the transaction code
    pub fn without_code(mut self) -> Self {
        self.transaction_code = None;
        self
    }

    /// Sets the transaction date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.transaction_date = date;
        self
    }

    /// Sets the initial units and clears the accumulation units
    pub fn with_units(mut self, units: Decimal) -> Self {
        self.initial_units = Some(units);
        self.accumulation_units = None;
        self
    }

    /// Sets both unit fields
    pub fn with_split_units(mut self, initial: Option<Decimal>, accumulation: Option<Decimal>) -> Self {
        self.initial_units = initial;
        self.accumulation_units = accumulation;
        self
    }

    /// Sets the unit rate
    pub fn at_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the price date
    pub fn with_price_date(mut self, price_date: impl Into<String>) -> Self {
        self.price_date = price_date.into();
        self
    }

    /// Builds the ledger entry
    ///
    /// # Panics
    ///
    /// Panics if the units or the amount leave the decimal range
    pub fn build(self) -> HistoryElement {
        HistoryElement::new(
            self.transaction_name,
            self.transaction_code,
            self.transaction_date,
            self.initial_units,
            self.accumulation_units,
            self.rate,
            self.price_date,
        )
        .expect("ledger entry out of decimal range")
    }
}

/// Builder for constructing contracts with fund histories
pub struct ContractBuilder {
    id: ContractId,
    details: ContractDetails,
    entries: Vec<(String, Option<String>, HistoryElement)>,
}

impl Default for ContractBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractBuilder {
    /// Creates a builder for the fixture contract without any entry
    pub fn new() -> Self {
        Self {
            id: ContractId::new(CONTRACT_ID),
            details: ContractDetails::new("UL01", "HUF").with_name("Befektetési Program"),
            entries: Vec::new(),
        }
    }

    /// Sets the contract id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = ContractId::new(id);
        self
    }

    /// Sets the contract header
    pub fn with_details(mut self, details: ContractDetails) -> Self {
        self.details = details;
        self
    }

    /// Books an entry against a fund
    pub fn with_entry(mut self, fund_name: impl Into<String>, element: HistoryElement) -> Self {
        self.entries.push((fund_name.into(), None, element));
        self
    }

    /// Books an entry against a fund, reporting a fund code
    pub fn with_coded_entry(
        mut self,
        fund_name: impl Into<String>,
        fund_code: impl Into<String>,
        element: HistoryElement,
    ) -> Self {
        self.entries.push((fund_name.into(), Some(fund_code.into()), element));
        self
    }

    /// Builds the contract
    ///
    /// # Panics
    ///
    /// Panics if the ledger totals leave the decimal range
    pub fn build(self) -> Contract {
        let mut contract = Contract::new(self.id, self.details);
        for (fund_name, fund_code, element) in self.entries {
            contract
                .add_to_fund(&fund_name, fund_code.as_deref(), element)
                .expect("ledger totals out of decimal range");
        }
        contract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder_defaults() {
        let element = HistoryElementBuilder::new().build();

        assert_eq!(element.transaction_code(), Some("B522"));
        assert_eq!(element.sum_amount(), dec!(1));
    }

    #[test]
    fn test_contract_builder_groups_entries() {
        let contract = ContractBuilder::new()
            .with_coded_entry("Alfa", "ALF", HistoryElementBuilder::new().build())
            .with_entry("Alfa", HistoryElementBuilder::new().with_units(dec!(2)).build())
            .with_entry("Beta", HistoryElementBuilder::new().build())
            .build();

        assert_eq!(contract.fund_count(), 2);
        assert_eq!(contract.fund("Alfa").unwrap().total_units(), dec!(3));
        assert_eq!(contract.fund("Alfa").unwrap().fund_code(), Some("ALF"));
    }
}
