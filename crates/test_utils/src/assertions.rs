//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for fund ledger types that give
//! more meaningful error messages than standard assertions.

use domain_fund::{Contract, FundHistorySummary};
use rust_decimal::Decimal;

/// Asserts that a fund was fully redeemed and valued without a rate
pub fn assert_fund_sold(summary: &FundHistorySummary) {
    assert!(
        summary.fund_sold,
        "Expected fund '{}' to be sold",
        summary.fund_name
    );
    assert_eq!(
        summary.rate, None,
        "Sold fund '{}' should not carry a rate",
        summary.fund_name
    );
    assert!(
        summary.total_balance.is_some(),
        "Sold fund '{}' should have a balance",
        summary.fund_name
    );
}

/// Asserts that an active fund could not be valued
pub fn assert_missing_rate(summary: &FundHistorySummary) {
    assert!(
        summary.is_missing_rate(),
        "Expected fund '{}' to lack a rate, got {:?}",
        summary.fund_name,
        summary.rate
    );
    assert_eq!(summary.current_value, None);
    assert_eq!(summary.total_balance, None);
    assert_eq!(summary.average_interest_rate, None);
}

/// Asserts the unit balance of a fund
///
/// # Panics
///
/// Panics if the contract has no fund of that name or the units differ
pub fn assert_fund_units(contract: &Contract, fund_name: &str, expected: Decimal) {
    let history = contract
        .fund(fund_name)
        .unwrap_or_else(|| panic!("Contract {} has no fund '{}'", contract.id(), fund_name));
    assert_eq!(
        history.total_units(),
        expected,
        "Unit balance of fund '{}'",
        fund_name
    );
}

/// Asserts the number of ledger entries booked against a fund
pub fn assert_element_count(contract: &Contract, fund_name: &str, expected: usize) {
    let actual = contract.fund(fund_name).map_or(0, |history| history.elements().len());
    assert_eq!(
        actual, expected,
        "Element count of fund '{}'",
        fund_name
    );
}
