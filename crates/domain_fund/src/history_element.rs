//! Ledger entries
//!
//! A `HistoryElement` is what one transaction record contributes to one
//! fund: a signed number of units priced at the rate applied on the price
//! date. Contributions carry positive units, deductions and redemptions
//! negative ones.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::error::FundError;
use crate::transaction_code::TransactionCategory;

/// One normalized ledger entry for one fund
///
/// # Invariants
///
/// - `sum_of_units` and `sum_amount` are computed once, at construction
/// - Both derived values are within the decimal range
/// - Entries are never modified after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryElement {
    transaction_name: String,
    transaction_code: Option<String>,
    transaction_date: NaiveDate,
    number_of_initial_units: Option<Decimal>,
    number_of_accumulation_units: Option<Decimal>,
    rate: Decimal,
    price_date: String,
    sum_of_units: Decimal,
    sum_amount: Decimal,
}

impl HistoryElement {
    /// Creates a new ledger entry
    ///
    /// # Arguments
    ///
    /// * `transaction_name` - Display label of the transaction
    /// * `transaction_code` - Classification key (e.g. `B522`), if the record had one
    /// * `transaction_date` - Date the transaction was booked
    /// * `number_of_initial_units` - Initial units moved, if any
    /// * `number_of_accumulation_units` - Accumulation units moved, if any
    /// * `rate` - Unit price applied
    /// * `price_date` - Date the unit price was struck, as reported by the source
    ///
    /// # Errors
    ///
    /// Returns `FundError::EntryOutOfRange` if the units or their cash
    /// amount cannot be represented
    pub fn new(
        transaction_name: impl Into<String>,
        transaction_code: Option<String>,
        transaction_date: NaiveDate,
        number_of_initial_units: Option<Decimal>,
        number_of_accumulation_units: Option<Decimal>,
        rate: Decimal,
        price_date: impl Into<String>,
    ) -> Result<Self, FundError> {
        let sum_of_units = number_of_initial_units
            .unwrap_or(Decimal::ZERO)
            .checked_add(number_of_accumulation_units.unwrap_or(Decimal::ZERO))
            .ok_or(FundError::EntryOutOfRange)?;
        let sum_amount = sum_of_units
            .checked_mul(rate)
            .ok_or(FundError::EntryOutOfRange)?;

        Ok(Self {
            transaction_name: transaction_name.into(),
            transaction_code,
            transaction_date,
            number_of_initial_units,
            number_of_accumulation_units,
            rate,
            price_date: price_date.into(),
            sum_of_units,
            sum_amount,
        })
    }

    pub fn transaction_name(&self) -> &str {
        &self.transaction_name
    }

    pub fn transaction_code(&self) -> Option<&str> {
        self.transaction_code.as_deref()
    }

    pub fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }

    pub fn number_of_initial_units(&self) -> Option<Decimal> {
        self.number_of_initial_units
    }

    pub fn number_of_accumulation_units(&self) -> Option<Decimal> {
        self.number_of_accumulation_units
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn price_date(&self) -> &str {
        &self.price_date
    }

    /// Initial plus accumulation units; zero when both are absent
    pub fn sum_of_units(&self) -> Decimal {
        self.sum_of_units
    }

    /// Cash equivalent of the units at the applied rate
    pub fn sum_amount(&self) -> Decimal {
        self.sum_amount
    }

    /// Deposit/reduction classification of the transaction code
    pub fn category(&self) -> Option<TransactionCategory> {
        self.transaction_code().and_then(TransactionCategory::of)
    }

    /// Orders entries by transaction date only
    pub fn cmp_by_date(&self, other: &Self) -> Ordering {
        self.transaction_date.cmp(&other.transaction_date)
    }
}
