//! Record parser
//!
//! Turns one exported transaction record into a `Contract` holding the
//! record's ledger entries grouped by fund. The transaction code on the root
//! selects the [`RecordLayout`]; everything else follows from the layout.

use chrono::NaiveDate;
use serde_json::Value;

use core_kernel::{parse_transaction_date, ContractId};
use domain_fund::{Contract, ContractDetails, HistoryElement};

use crate::error::IngestError;
use crate::layout::{FieldMapping, RecordLayout};
use crate::record::RecordObject;

pub const TRANSACTION_NAME: &str = "transactionName";
pub const TRANSACTION_CODE: &str = "transactionCode";
pub const TRANSACTION_DATE: &str = "transactionDate";
pub const CONTRACT: &str = "contract";
pub const FUND_NAME: &str = "fundName";
pub const FUND_CODE: &str = "unitVirtualFund";

/// Transaction data shared by every entry of a record
#[derive(Debug, Clone, PartialEq, Eq)]
struct TransactionHeader {
    name: String,
    code: String,
    date: NaiveDate,
}

/// Parses one raw transaction record
///
/// # Arguments
///
/// * `record` - The record as exported, one JSON document per transaction
///
/// # Returns
///
/// A contract carrying the record's header data and one fund history per
/// fund mentioned in the record
///
/// # Errors
///
/// - `IngestError::MalformedRecord` if the record lacks a transaction code,
///   the contract header, its entries or any mandatory field, holds a value
///   that cannot be converted, or books units whose amounts leave the decimal
///   range
/// - `IngestError::UnsupportedTransactionType` if the transaction code has
///   no known layout
pub fn parse_record(record: &Value) -> Result<Contract, IngestError> {
    let root = RecordObject::from_value("", record)?;
    let code = root.required_string(TRANSACTION_CODE)?;
    let layout = RecordLayout::for_transaction_code(&code)
        .ok_or_else(|| IngestError::UnsupportedTransactionType(code.clone()))?;

    RecordParser::new(root, layout).parse(code)
}

/// Parser bound to the layout of one record
#[derive(Debug, Clone, Copy)]
pub struct RecordParser<'a> {
    root: RecordObject<'a>,
    layout: RecordLayout,
}

impl<'a> RecordParser<'a> {
    pub fn new(root: RecordObject<'a>, layout: RecordLayout) -> Self {
        Self { root, layout }
    }

    /// Parses the contract header and every entry of the record
    ///
    /// # Arguments
    ///
    /// * `code` - The record's transaction code, already read from the root
    pub fn parse(&self, code: String) -> Result<Contract, IngestError> {
        let mut contract = parse_contract(&self.root)?;

        let raw_date = self.root.required_string(TRANSACTION_DATE)?;
        let header = TransactionHeader {
            name: self.root.required_string(TRANSACTION_NAME)?,
            code,
            date: parse_transaction_date(&raw_date)
                .map_err(|err| IngestError::invalid(TRANSACTION_DATE, err))?,
        };

        let fields = self.layout.fields();
        let root_price_date = self.root.string(fields.price_date)?;

        for array in self.layout.arrays() {
            for (index, value) in self.root.array(array)?.iter().enumerate() {
                let path = format!("{}[{}]", array, index);
                let entry = RecordObject::from_value(&path, value)?;
                let (fund_name, fund_code, element) =
                    self.parse_entry(&entry, &header, fields, root_price_date.as_deref())?;
                contract
                    .add_to_fund(&fund_name, fund_code.as_deref(), element)
                    .map_err(|_| IngestError::out_of_range(&path))?;
            }
        }

        Ok(contract)
    }

    fn parse_entry(
        &self,
        entry: &RecordObject<'_>,
        header: &TransactionHeader,
        fields: &FieldMapping,
        root_price_date: Option<&str>,
    ) -> Result<(String, Option<String>, HistoryElement), IngestError> {
        let fund_name = entry.required_string(FUND_NAME)?;
        let fund_code = entry.string(FUND_CODE)?;

        let initial_units = entry.decimal(fields.initial_units)?;
        let accumulation_units = match fields.accumulation_units {
            Some(name) => entry.decimal(name)?,
            None => None,
        };
        let rate = entry.required_decimal(fields.rate)?;

        let entry_price_date = entry.string(fields.price_date)?;
        let price_date = if self.layout.price_date_on_root() {
            root_price_date.map(str::to_string).or(entry_price_date)
        } else {
            entry_price_date.or_else(|| root_price_date.map(str::to_string))
        }
        .ok_or_else(|| IngestError::missing(fields.price_date))?;

        let element = HistoryElement::new(
            header.name.clone(),
            Some(header.code.clone()),
            header.date,
            initial_units,
            accumulation_units,
            rate,
            price_date,
        )
        .map_err(|_| IngestError::out_of_range(entry.path()))?;

        Ok((fund_name, fund_code, element))
    }
}

fn parse_contract(root: &RecordObject<'_>) -> Result<Contract, IngestError> {
    let contract = root.object(CONTRACT)?;

    let id = contract.required_string("contractId")?;
    let details = ContractDetails {
        name: contract.string("fantasyName")?,
        contract_type: contract.required_string("contractTypeNumber")?,
        type_name: contract.string("contractTypeName")?,
        currency: contract.required_string("currency")?,
        actual_value: contract.decimal("actualValue")?,
        surrender_value: contract.decimal("surrenderValue")?,
        due_amount: contract.decimal("dueAmount")?,
        paid_to_date: contract.string("paidToDate")?,
    };

    Ok(Contract::new(ContractId::new(id), details))
}
