//! Fund Ledger Domain
//!
//! This crate models the transaction history of a Unit-Linked Insurance Plan
//! (ULIP) contract and values each of its funds against published unit rates.
//!
//! # Key Concepts
//!
//! - **Contract**: The policy; owns one fund history per fund name
//! - **Fund History**: Every ledger entry booked against one fund
//! - **History Element**: A signed number of units priced at a rate
//! - **Rate Table**: Published unit rates, matched to funds by fuzzy name
//! - **Valuation**: Deposits, reductions, current value, net balance and
//!   average yearly interest rate per fund
//!
//! # Sign Convention
//!
//! Units bought carry positive amounts, units sold or deducted negative ones:
//! - Premium: 10 units @ 100 = +1000
//! - Cost deduction: -2 units @ 110 = -220
//!
//! The net balance of a fund is its current value minus the sum of all
//! amounts.

pub mod contract;
pub mod error;
pub mod fund_history;
pub mod history_element;
pub mod matching;
pub mod merge;
pub mod rate;
pub mod report;
pub mod transaction_code;
pub mod valuation;

pub use contract::{Contract, ContractDetails};
pub use error::FundError;
pub use fund_history::FundHistory;
pub use history_element::HistoryElement;
pub use matching::{label_matches, levenshtein, MAX_WORD_DISTANCE};
pub use merge::{merge_contracts, HistoryMerger};
pub use rate::{FundRate, RateLookup, RateSource, RateTable};
pub use report::ReportSink;
pub use transaction_code::TransactionCategory;
pub use valuation::{
    average_interest_rate, summarize, ContractValuation, FundHistorySummary, SummaryTotals,
    ValuationEngine,
};
