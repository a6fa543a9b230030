//! Transaction date handling
//!
//! Source records carry dates either in the dotted form used by the
//! policy administration system (`2018.07.17`, sometimes with a trailing
//! dot) or in ISO form (`2018-07-17`, optionally followed by a time).
//! Everything downstream works on `NaiveDate`, whose ordering matches the
//! lexicographic ordering of the canonical ISO string.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Canonical date format used for display and serialization
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const DOTTED_DATE_FORMAT: &str = "%Y.%m.%d";

/// Parses a transaction date in dotted or ISO form
///
/// # Arguments
///
/// * `raw` - The date as it appears in the source record
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the text matches neither form
///
/// # Example
///
/// ```rust
/// use core_kernel::parse_transaction_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2018, 7, 17).unwrap();
/// assert_eq!(parse_transaction_date("2018.07.17.").unwrap(), expected);
/// assert_eq!(parse_transaction_date("2018-07-17T00:00:00").unwrap(), expected);
/// ```
pub fn parse_transaction_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim().trim_end_matches('.');
    let date_part = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(date_part, DOTTED_DATE_FORMAT))
        .map_err(|_| CoreError::invalid_date(raw))
}

/// Whole months between two dates, each truncated to the first of its month
///
/// The result is negative when `to` falls in an earlier month than `from`.
///
/// # Example
///
/// ```rust
/// use core_kernel::months_between;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2011, 6, 17).unwrap();
/// let to = NaiveDate::from_ymd_opt(2018, 7, 17).unwrap();
/// assert_eq!(months_between(from, to), 85);
/// ```
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    month_index(to) - month_index(from)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}
