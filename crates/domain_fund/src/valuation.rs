//! Fund valuation
//!
//! Turns each fund history of a contract into a `FundHistorySummary`:
//! deposit and reduction totals, the current value and net balance at the
//! published rate, and the average yearly interest rate.
//!
//! # Sold vs. active funds
//!
//! A fund whose units sum to exactly zero has been fully redeemed. Its
//! result is final and needs no rate. Every other fund is valued at the rate
//! resolved from the [`RateTable`]; without a rate its value stays unknown
//! and a warning is recorded instead of failing the run.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use core_kernel::{checked_sum, divide_half_up, RATIO_PRECISION};

use crate::contract::Contract;
use crate::fund_history::FundHistory;
use crate::history_element::HistoryElement;
use crate::rate::{RateLookup, RateTable};
use crate::transaction_code::TransactionCategory;

const MONTHS_PER_YEAR: i64 = 12;

/// Valuation result of one fund
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundHistorySummary {
    pub fund_name: String,
    /// Sum of premium amounts (B522, T536)
    pub deposit_sum: Decimal,
    /// Sum of cost deduction amounts (B633, B675)
    pub reduction_sum: Decimal,
    /// Units held valued at the published rate
    pub current_value: Option<Decimal>,
    /// Published rate used for an active fund
    pub rate: Option<Decimal>,
    /// Net cash result of the fund
    pub total_balance: Option<Decimal>,
    /// Net result relative to the contributions, projected to a year
    pub average_interest_rate: Option<Decimal>,
    /// True if every unit of the fund has been redeemed
    pub fund_sold: bool,
}

impl FundHistorySummary {
    /// Returns true if the fund is active but could not be valued
    pub fn is_missing_rate(&self) -> bool {
        !self.fund_sold && self.rate.is_none()
    }
}

/// Totals across all funds of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub deposit_sum: Decimal,
    pub reduction_sum: Decimal,
    /// Absent if rates are unavailable or any active fund lacks a rate
    pub current_value: Option<Decimal>,
    /// Absent if any active fund lacks a rate
    pub total_balance: Option<Decimal>,
}

impl SummaryTotals {
    /// Adds up the fund summaries of one contract
    ///
    /// Deposit and reduction sums stay within the contract's amount range.
    /// Current values depend on the published rates, so a total that cannot
    /// be represented is left absent.
    ///
    /// # Arguments
    ///
    /// * `summaries` - One summary per fund
    /// * `rates_available` - Whether the rate source supplied any rate
    pub(crate) fn from_summaries(summaries: &[FundHistorySummary], rates_available: bool) -> Self {
        let any_missing_rate = summaries.iter().any(FundHistorySummary::is_missing_rate);

        let current_value = if rates_available && !any_missing_rate {
            checked_sum(summaries.iter().filter_map(|s| s.current_value))
        } else {
            None
        };
        let total_balance = if any_missing_rate {
            None
        } else {
            checked_sum(summaries.iter().filter_map(|s| s.total_balance))
        };

        Self {
            deposit_sum: summaries.iter().map(|s| s.deposit_sum).sum(),
            reduction_sum: summaries.iter().map(|s| s.reduction_sum).sum(),
            current_value,
            total_balance,
        }
    }
}

/// Valuation of a whole contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractValuation {
    /// One summary per fund, ordered by fund name
    pub summaries: Vec<FundHistorySummary>,
    pub totals: SummaryTotals,
    /// Human-readable notices collected during valuation, in order
    pub warnings: Vec<String>,
    /// Whether the rate source supplied any rate
    pub rates_available: bool,
    /// Date the rates were published for
    pub rate_date: Option<String>,
}

/// Values fund histories against a table of published rates
#[derive(Debug, Clone, Copy)]
pub struct ValuationEngine<'a> {
    rates: &'a RateTable,
}

impl<'a> ValuationEngine<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Values every fund of a contract
    ///
    /// Each fund's elements are left sorted ascending by transaction date so
    /// the contract can be handed to a report sink afterwards.
    pub fn value(&self, contract: &mut Contract) -> ContractValuation {
        let rates_available = self.rates.is_available();
        if !rates_available {
            warn!(contract_id = %contract.id(), "No exchange rates available, active funds cannot be valued");
        }

        let mut warnings = Vec::new();
        let summaries: Vec<FundHistorySummary> = contract
            .fund_histories_mut()
            .map(|history| self.summarize_fund(history, &mut warnings))
            .collect();
        let totals = SummaryTotals::from_summaries(&summaries, rates_available);

        ContractValuation {
            summaries,
            totals,
            warnings,
            rates_available,
            rate_date: self.rates.rate_date().map(str::to_string),
        }
    }

    /// Values one fund, recording a warning if an active fund has no rate
    /// or cannot be valued at its rate
    pub fn summarize_fund(&self, history: &mut FundHistory, warnings: &mut Vec<String>) -> FundHistorySummary {
        history.sort_by_date();

        let rate = if history.total_units().is_zero() {
            None
        } else {
            self.resolve_rate(history.fund_name(), warnings)
        };

        let summary = summarize(history, rate);
        if let (Some(rate), None) = (rate, summary.rate) {
            warn!(fund = %history.fund_name(), %rate, "Fund value exceeds the decimal range");
            warnings.push(format!(
                "value of fund '{}' at rate {} exceeds the decimal range",
                history.fund_name(),
                rate
            ));
        }
        summary
    }

    fn resolve_rate(&self, fund_name: &str, warnings: &mut Vec<String>) -> Option<Decimal> {
        match self.rates.resolve(fund_name) {
            RateLookup::Resolved(rate) => {
                debug!(fund = %fund_name, %rate, "Exchange rate resolved");
                Some(rate)
            }
            RateLookup::NotFound => {
                warn!(fund = %fund_name, "No exchange rate for fund");
                warnings.push(format!("no exchange rate for fund '{}'", fund_name));
                None
            }
            RateLookup::SourceUnavailable => {
                warnings.push(format!(
                    "no exchange rate for fund '{}' (rate source unavailable)",
                    fund_name
                ));
                None
            }
        }
    }
}

/// Summarizes one fund history
///
/// An active fund whose value at `rate` cannot be represented is treated
/// like a fund without a rate.
///
/// # Arguments
///
/// * `history` - The fund's ledger
/// * `rate` - Published rate for the fund; ignored once the fund is sold
pub fn summarize(history: &FundHistory, rate: Option<Decimal>) -> FundHistorySummary {
    let fund_sold = history.total_units().is_zero();

    let (rate, current_value, total_balance) = if fund_sold {
        (None, None, Some(history.total_balance()))
    } else {
        let valued = rate.and_then(|r| {
            let current_value = history.current_value_at(r)?;
            let total_balance = history.total_balance_at(r)?;
            Some((r, current_value, total_balance))
        });
        match valued {
            Some((r, current_value, total_balance)) => (Some(r), Some(current_value), Some(total_balance)),
            None => (None, None, None),
        }
    };

    FundHistorySummary {
        fund_name: history.fund_name().to_string(),
        deposit_sum: sum_amount(history, TransactionCategory::Deposit),
        reduction_sum: sum_amount(history, TransactionCategory::Reduction),
        current_value,
        rate,
        total_balance,
        average_interest_rate: total_balance.and_then(|balance| average_interest_rate(balance, history)),
        fund_sold,
    }
}

/// Average yearly interest rate of a fund
///
/// The balance is taken relative to the contributions (the sum of the
/// positive amounts), spread evenly over the months between the first and
/// the last transaction and scaled to twelve months. The result is rounded
/// half-up to [`RATIO_PRECISION`] digits once, after annualizing.
///
/// # Returns
///
/// - zero if nothing was contributed
/// - the plain ratio if all transactions fall in one month
/// - `None` if the rate cannot be represented
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_fund::{average_interest_rate, FundHistory, HistoryElement};
/// use rust_decimal_macros::dec;
///
/// let premium = |date: NaiveDate, units| {
///     HistoryElement::new("Premium", Some("B522".to_string()), date, Some(units), None, dec!(1), "").unwrap()
/// };
/// let mut history = FundHistory::new("Alfa", None, premium(NaiveDate::from_ymd_opt(2018, 1, 10).unwrap(), dec!(1000)));
/// history.push(premium(NaiveDate::from_ymd_opt(2019, 1, 10).unwrap(), dec!(0))).unwrap();
///
/// assert_eq!(average_interest_rate(dec!(200), &history), Some(dec!(0.2)));
/// ```
pub fn average_interest_rate(total_balance: Decimal, history: &FundHistory) -> Option<Decimal> {
    let contribution_base = history.contribution_base();
    if contribution_base.is_zero() {
        return Some(Decimal::ZERO);
    }

    let months = history.period_length_in_months();
    if months == 0 {
        return divide_half_up(total_balance, contribution_base, RATIO_PRECISION);
    }

    let yearly_balance = total_balance.checked_mul(Decimal::from(MONTHS_PER_YEAR))?;
    let spread_base = contribution_base.checked_mul(Decimal::from(months))?;
    divide_half_up(yearly_balance, spread_base, RATIO_PRECISION)
}

fn sum_amount(history: &FundHistory, category: TransactionCategory) -> Decimal {
    history
        .elements()
        .iter()
        .filter(|element| element.category() == Some(category))
        .map(HistoryElement::sum_amount)
        .sum()
}
