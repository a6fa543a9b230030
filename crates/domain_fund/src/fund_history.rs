//! Per-fund ledger
//!
//! A `FundHistory` collects every `HistoryElement` booked against one fund of
//! one contract and derives the unit balance and cash result from them.

use rust_decimal::Decimal;

use core_kernel::months_between;

use crate::error::FundError;
use crate::history_element::HistoryElement;

/// All ledger entries for one fund within one contract
///
/// # Invariants
///
/// - A history always holds at least one element; it is created together
///   with its first one
/// - The fund code, once known, is never replaced by an empty value
/// - The sums of the absolute units and of the absolute amounts of all
///   elements are within the decimal range, so no partial sum of units or
///   amounts can overflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundHistory {
    fund_name: String,
    fund_code: Option<String>,
    elements: Vec<HistoryElement>,
    gross_units: Decimal,
    gross_amount: Decimal,
}

impl FundHistory {
    /// Creates a history holding its first element
    ///
    /// # Arguments
    ///
    /// * `fund_name` - Name of the fund, used as its identity key
    /// * `fund_code` - Secondary identifier; empty codes are treated as unknown
    /// * `first` - The first ledger entry of the fund
    pub fn new(fund_name: impl Into<String>, fund_code: Option<String>, first: HistoryElement) -> Self {
        Self {
            fund_name: fund_name.into(),
            fund_code: non_empty(fund_code),
            gross_units: first.sum_of_units().abs(),
            gross_amount: first.sum_amount().abs(),
            elements: vec![first],
        }
    }

    pub fn fund_name(&self) -> &str {
        &self.fund_name
    }

    pub fn fund_code(&self) -> Option<&str> {
        self.fund_code.as_deref()
    }

    pub fn elements(&self) -> &[HistoryElement] {
        &self.elements
    }

    /// Sum of the absolute cash amounts of all elements
    pub fn gross_amount(&self) -> Decimal {
        self.gross_amount
    }

    /// Appends a ledger entry
    ///
    /// # Errors
    ///
    /// Returns `FundError::TotalsOutOfRange` if the fund's totals would leave
    /// the decimal range; the history is left untouched
    pub fn push(&mut self, element: HistoryElement) -> Result<(), FundError> {
        let (gross_units, gross_amount) =
            self.grown_totals(element.sum_of_units().abs(), element.sum_amount().abs())?;

        self.elements.push(element);
        self.gross_units = gross_units;
        self.gross_amount = gross_amount;
        Ok(())
    }

    /// Sets the fund code if none is known yet and the given one is non-empty
    pub fn backfill_fund_code(&mut self, fund_code: Option<&str>) {
        if self.fund_code.is_none() {
            self.fund_code = non_empty(fund_code.map(str::to_string));
        }
    }

    /// Checks that `other` can be folded into this history
    ///
    /// # Errors
    ///
    /// Returns `FundError::TotalsOutOfRange` if the combined totals would
    /// leave the decimal range
    pub fn check_absorb(&self, other: &FundHistory) -> Result<(), FundError> {
        self.grown_totals(other.gross_units, other.gross_amount).map(|_| ())
    }

    /// Folds another history of the same fund into this one
    ///
    /// Elements of `other` are appended after the existing ones and its code
    /// fills in a missing code.
    ///
    /// # Errors
    ///
    /// Returns `FundError::TotalsOutOfRange` if the combined totals would
    /// leave the decimal range; the history is left untouched
    pub fn absorb(&mut self, other: FundHistory) -> Result<(), FundError> {
        let (gross_units, gross_amount) = self.grown_totals(other.gross_units, other.gross_amount)?;

        self.backfill_fund_code(other.fund_code.as_deref());
        self.elements.extend(other.elements);
        self.gross_units = gross_units;
        self.gross_amount = gross_amount;
        Ok(())
    }

    fn grown_totals(&self, units: Decimal, amount: Decimal) -> Result<(Decimal, Decimal), FundError> {
        self.gross_units
            .checked_add(units)
            .zip(self.gross_amount.checked_add(amount))
            .ok_or_else(|| FundError::TotalsOutOfRange {
                owner: self.fund_name.clone(),
            })
    }

    /// Sorts the elements ascending by transaction date
    ///
    /// The sort is stable: entries booked on the same day keep their
    /// insertion order.
    pub fn sort_by_date(&mut self) {
        self.elements.sort_by(HistoryElement::cmp_by_date);
    }

    /// Sum of the units of all elements
    pub fn total_units(&self) -> Decimal {
        self.elements.iter().map(HistoryElement::sum_of_units).sum()
    }

    /// Sum of the signed cash amounts of all elements
    pub fn total_amount(&self) -> Decimal {
        self.elements.iter().map(HistoryElement::sum_amount).sum()
    }

    /// Sum of the strictly positive cash amounts (the contribution base)
    pub fn contribution_base(&self) -> Decimal {
        self.elements
            .iter()
            .map(HistoryElement::sum_amount)
            .filter(|amount| *amount > Decimal::ZERO)
            .sum()
    }

    /// Net cash result of a fully redeemed fund
    ///
    /// Contributions count positive and redemptions negative in the ledger,
    /// so the result is the negated sum of all amounts.
    pub fn total_balance(&self) -> Decimal {
        -self.total_amount()
    }

    /// Units held valued at `rate`; `None` if the value cannot be represented
    pub fn current_value_at(&self, rate: Decimal) -> Option<Decimal> {
        self.total_units().checked_mul(rate)
    }

    /// Net result of a fund still holding units, valued at `rate`
    ///
    /// `None` if the value cannot be represented.
    pub fn total_balance_at(&self, rate: Decimal) -> Option<Decimal> {
        self.current_value_at(rate)?.checked_sub(self.total_amount())
    }

    /// Whole months between the first and the last transaction
    ///
    /// Dates are truncated to the first of their month; a history whose
    /// entries all fall in one month yields 0.
    pub fn period_length_in_months(&self) -> i64 {
        let first = self.elements.iter().map(HistoryElement::transaction_date).min();
        let last = self.elements.iter().map(HistoryElement::transaction_date).max();

        match (first, last) {
            (Some(first), Some(last)) => months_between(first, last),
            _ => 0,
        }
    }
}

fn non_empty(code: Option<String>) -> Option<String> {
    code.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn element(date: &str, units: Decimal, rate: Decimal) -> HistoryElement {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        HistoryElement::new("Premium", Some("B522".to_string()), date, Some(units), None, rate, "").unwrap()
    }

    fn more_than_half_of_max() -> Decimal {
        Decimal::from_i128_with_scale(40_000_000_000_000_000_000_000_000_000, 0)
    }

    #[test]
    fn test_empty_code_is_unknown() {
        let history = FundHistory::new("Alfa", Some(String::new()), element("2018-01-01", dec!(1), dec!(1)));
        assert_eq!(history.fund_code(), None);
    }

    #[test]
    fn test_backfill_keeps_first_code() {
        let mut history = FundHistory::new("Alfa", None, element("2018-01-01", dec!(1), dec!(1)));
        history.backfill_fund_code(Some(""));
        assert_eq!(history.fund_code(), None);

        history.backfill_fund_code(Some("A01"));
        history.backfill_fund_code(Some("B02"));
        assert_eq!(history.fund_code(), Some("A01"));
    }

    #[test]
    fn test_balances() {
        let mut history = FundHistory::new("Alfa", None, element("2018-01-01", dec!(10), dec!(100)));
        history.push(element("2019-01-01", dec!(-4), dec!(110))).unwrap();

        assert_eq!(history.total_units(), dec!(6));
        assert_eq!(history.total_amount(), dec!(560));
        assert_eq!(history.total_balance(), dec!(-560));
        assert_eq!(history.total_balance_at(dec!(120)), Some(dec!(160)));
        assert_eq!(history.contribution_base(), dec!(1000));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut history = FundHistory::new("Alfa", None, element("2018-05-01", dec!(1), dec!(1)));
        history.push(element("2018-01-01", dec!(2), dec!(1))).unwrap();
        history.push(element("2018-05-01", dec!(3), dec!(1))).unwrap();
        history.sort_by_date();

        let units: Vec<Decimal> = history.elements().iter().map(HistoryElement::sum_of_units).collect();
        assert_eq!(units, vec![dec!(2), dec!(1), dec!(3)]);
    }

    #[test]
    fn test_push_beyond_decimal_range_is_rejected() {
        let half = more_than_half_of_max();
        let mut history = FundHistory::new("Alfa", None, element("2018-01-01", half, dec!(1)));

        let err = history.push(element("2018-02-01", -half, dec!(1))).unwrap_err();

        assert_eq!(err, FundError::TotalsOutOfRange { owner: "Alfa".to_string() });
        assert_eq!(history.elements().len(), 1);
        assert_eq!(history.total_units(), half);
    }

    #[test]
    fn test_absorb_beyond_decimal_range_leaves_history_untouched() {
        let half = more_than_half_of_max();
        let mut history = FundHistory::new("Alfa", Some("A01".to_string()), element("2018-01-01", half, dec!(1)));
        let other = FundHistory::new("Alfa", None, element("2018-02-01", half, dec!(1)));

        assert!(history.check_absorb(&other).is_err());
        assert!(history.absorb(other).is_err());
        assert_eq!(history.elements().len(), 1);
    }

    #[test]
    fn test_value_beyond_decimal_range_is_none() {
        let history = FundHistory::new("Alfa", None, element("2018-01-01", dec!(10), dec!(1)));

        assert_eq!(history.current_value_at(Decimal::MAX), None);
        assert_eq!(history.total_balance_at(Decimal::MAX), None);
        assert_eq!(history.current_value_at(dec!(2)), Some(dec!(20)));
    }
}
