//! Transaction Record Ingestion
//!
//! This crate maps the JSON transaction records exported by the policy
//! administration system onto the fund ledger of `domain_fund`.
//!
//! # Supported Transactions
//!
//! - **B522 / T536**: Regular and advance premium, units bought
//! - **B633**: Benefit billing, units deducted for costs
//! - **B675**: Anniversary deduction, units deducted for costs
//! - **BZ89**: Fund switch, units moved from source funds into target funds
//!
//! Each record carries the contract header, the transaction name, code and
//! date, and one entry per affected fund. Parsing is a pure transform.

pub mod error;
pub mod layout;
pub mod parser;
pub mod record;

pub use error::IngestError;
pub use layout::{FieldMapping, RecordLayout};
pub use parser::{parse_record, RecordParser};
pub use record::RecordObject;
