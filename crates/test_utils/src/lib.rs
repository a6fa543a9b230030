//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fund history test suite.
//!
//! # Modules
//!
//! - `fixtures`: Raw transaction records and rate files
//! - `builders`: Builder patterns for ledger entries and contracts
//! - `assertions`: Custom assertion helpers for valuation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
