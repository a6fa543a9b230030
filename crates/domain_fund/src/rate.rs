//! Exchange rate resolution
//!
//! Active funds are valued at the latest published unit rate. Rates come
//! from outside the ledger (a rate file or a scraped rate table) as a list of
//! `(label, rate)` pairs and are matched to fund names with the fuzzy word
//! matching in [`crate::matching`].

use rust_decimal::Decimal;

use crate::matching::label_matches;

/// A published unit rate for one fund
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundRate {
    /// Fund label as published by the rate source
    pub label: String,
    /// Unit rate in the contract currency
    pub rate: Decimal,
}

impl FundRate {
    pub fn new(label: impl Into<String>, rate: Decimal) -> Self {
        Self {
            label: label.into(),
            rate,
        }
    }
}

/// Outcome of a rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLookup {
    /// A label matched the fund name
    Resolved(Decimal),
    /// Rates were available but none matched the fund name
    NotFound,
    /// The rate source supplied no rates at all
    SourceUnavailable,
}

impl RateLookup {
    /// The resolved rate, if any
    pub fn rate(self) -> Option<Decimal> {
        match self {
            RateLookup::Resolved(rate) => Some(rate),
            RateLookup::NotFound | RateLookup::SourceUnavailable => None,
        }
    }
}

/// Ordered collection of published rates
///
/// Lookup order is the order in which the source supplied the rates; the
/// first matching label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rate_date: Option<String>,
    rates: Vec<FundRate>,
}

impl RateTable {
    /// Creates a rate table
    ///
    /// # Arguments
    ///
    /// * `rate_date` - Date the rates were published for, if known
    /// * `rates` - Published rates in source order
    pub fn new(rate_date: Option<String>, rates: Vec<FundRate>) -> Self {
        Self { rate_date, rates }
    }

    /// A table standing in for a rate source that could not be read
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn rate_date(&self) -> Option<&str> {
        self.rate_date.as_deref()
    }

    pub fn rates(&self) -> &[FundRate] {
        &self.rates
    }

    /// Returns true if the source supplied at least one rate
    pub fn is_available(&self) -> bool {
        !self.rates.is_empty()
    }

    /// Finds the rate of a fund by fuzzy label matching
    ///
    /// # Arguments
    ///
    /// * `fund_name` - The fund name as recorded in the transaction history
    ///
    /// # Returns
    ///
    /// The rate of the first label whose words cover every word of the fund
    /// name, `NotFound` if no label does, or `SourceUnavailable` if the
    /// table is empty
    pub fn resolve(&self, fund_name: &str) -> RateLookup {
        if !self.is_available() {
            return RateLookup::SourceUnavailable;
        }

        self.rates
            .iter()
            .find(|quote| label_matches(fund_name, &quote.label))
            .map_or(RateLookup::NotFound, |quote| RateLookup::Resolved(quote.rate))
    }
}

/// Port for anything able to supply published rates
///
/// Implemented by the rate file adapter; a scraped rate table can be turned
/// into a [`RateTable`] directly.
pub trait RateSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the published rates
    fn load_rates(&self) -> Result<RateTable, Self::Error>;
}
