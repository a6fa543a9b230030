//! Decimal helpers with explicit rounding
//!
//! Unit counts, rates and amounts are carried as `rust_decimal::Decimal`
//! exactly as they arrive. Rounding only happens on ratio divisions, where
//! the quotient is rounded half-up (away from zero on a tie).

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::CoreError;

/// Fractional digits kept by ratio divisions (balance ratios, interest rates)
pub const RATIO_PRECISION: u32 = 6;

/// Rounds a value half-up to the given number of fractional digits
///
/// # Example
///
/// ```rust
/// use core_kernel::round_half_up;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_up(dec!(0.0000125), 6), dec!(0.000013));
/// assert_eq!(round_half_up(dec!(-0.0000125), 6), dec!(-0.000013));
/// ```
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides two decimals and rounds the quotient half-up
///
/// # Arguments
///
/// * `dividend` - The value to divide
/// * `divisor` - The value to divide by
/// * `dp` - Fractional digits of the rounded quotient
///
/// # Returns
///
/// The rounded quotient, or `None` if the divisor is zero or the
/// division overflows
pub fn divide_half_up(dividend: Decimal, divisor: Decimal, dp: u32) -> Option<Decimal> {
    dividend
        .checked_div(divisor)
        .map(|quotient| round_half_up(quotient, dp))
}

/// Adds up decimals without panicking on overflow
///
/// # Returns
///
/// The sum, or `None` if any partial sum leaves the decimal range
///
/// # Example
///
/// ```rust
/// use core_kernel::checked_sum;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(checked_sum([dec!(1.5), dec!(-0.5)]), Some(dec!(1)));
/// assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
/// ```
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Parses a decimal from its textual form
///
/// Accepts plain notation (`"12.3456"`) and scientific notation
/// (`"1.5e-3"`); surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `CoreError::InvalidDecimal` if the text is empty or not a number
pub fn parse_decimal(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_decimal(raw));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::invalid_decimal(raw))
}
