//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledger data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use domain_fund::HistoryElement;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating signed unit counts with six fraction digits
fn units_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

/// Strategy for generating positive unit rates (0.0001 to 10000)
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for generating transaction dates between 2005 and 2025
fn transaction_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..7300i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2005, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating transaction codes, including unclassified ones
fn transaction_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("B522".to_string()),
        Just("T536".to_string()),
        Just("B633".to_string()),
        Just("B675".to_string()),
        Just("BZ89".to_string()),
    ]
}

/// Strategy for generating ledger entries
pub fn history_element_strategy() -> impl Strategy<Value = HistoryElement> {
    (
        transaction_code_strategy(),
        transaction_date_strategy(),
        proptest::option::of(units_strategy()),
        proptest::option::of(units_strategy()),
        rate_strategy(),
    )
        .prop_map(|(code, date, initial, accumulation, rate)| {
            let price_date = date.format("%Y.%m.%d").to_string();
            HistoryElement::new(code.clone(), Some(code), date, initial, accumulation, rate, price_date)
                .expect("generated entries stay far below the decimal range")
        })
}

/// Strategy for generating fund names of one to three words
pub fn fund_name_strategy() -> impl Strategy<Value = String> {
    "[A-ZÁÉ][a-záéöü]{2,10}( [A-Za-záéöü]{2,10}){0,2}".prop_map(|s| s)
}
