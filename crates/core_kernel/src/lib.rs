//! Core Kernel - Foundational types shared by the fund history crates
//!
//! This crate provides the building blocks used by the ingestion and
//! valuation crates:
//! - Decimal helpers with explicit half-up rounding
//! - Transaction date normalisation and month arithmetic
//! - Contract and run identifiers

pub mod decimal;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use decimal::{checked_sum, divide_half_up, parse_decimal, round_half_up, RATIO_PRECISION};
pub use temporal::{months_between, parse_transaction_date, ISO_DATE_FORMAT};
pub use identifiers::{ContractId, RunId};
pub use error::CoreError;
