//! JSON fund report
//!
//! Writes one document per run: the contract header, one section per fund
//! with its summary and its ledger entries in date order, the totals row and
//! every warning raised while valuing the funds.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use domain_fund::{
    Contract, ContractDetails, ContractValuation, FundHistory, FundHistorySummary, HistoryElement,
    ReportSink, SummaryTotals,
};

use crate::error::SourceError;

/// Serialized form of a whole report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument<'a> {
    pub contract_id: &'a str,
    pub contract: &'a ContractDetails,
    pub rate_date: Option<&'a str>,
    pub rates_available: bool,
    pub funds: Vec<FundSection<'a>>,
    pub totals: &'a SummaryTotals,
    pub warnings: &'a [String],
}

/// One fund of the report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSection<'a> {
    pub fund_name: &'a str,
    pub fund_code: Option<&'a str>,
    pub summary: Option<&'a FundHistorySummary>,
    pub elements: Vec<ElementRow<'a>>,
}

/// One ledger entry of a fund, with its derived values
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRow<'a> {
    pub transaction_date: NaiveDate,
    pub transaction_name: &'a str,
    pub transaction_code: Option<&'a str>,
    pub number_of_initial_units: Option<Decimal>,
    pub number_of_accumulation_units: Option<Decimal>,
    pub rate: Decimal,
    pub price_date: &'a str,
    pub sum_of_units: Decimal,
    pub sum_amount: Decimal,
}

impl<'a> ReportDocument<'a> {
    /// Assembles the report of a valued contract
    pub fn new(contract: &'a Contract, valuation: &'a ContractValuation) -> Self {
        let funds = contract
            .fund_histories()
            .map(|history| FundSection::new(history, valuation))
            .collect();

        Self {
            contract_id: contract.id().as_str(),
            contract: contract.details(),
            rate_date: valuation.rate_date.as_deref(),
            rates_available: valuation.rates_available,
            funds,
            totals: &valuation.totals,
            warnings: &valuation.warnings,
        }
    }
}

impl<'a> FundSection<'a> {
    fn new(history: &'a FundHistory, valuation: &'a ContractValuation) -> Self {
        Self {
            fund_name: history.fund_name(),
            fund_code: history.fund_code(),
            summary: valuation
                .summaries
                .iter()
                .find(|summary| summary.fund_name == history.fund_name()),
            elements: history.elements().iter().map(ElementRow::from).collect(),
        }
    }
}

impl<'a> From<&'a HistoryElement> for ElementRow<'a> {
    fn from(element: &'a HistoryElement) -> Self {
        Self {
            transaction_date: element.transaction_date(),
            transaction_name: element.transaction_name(),
            transaction_code: element.transaction_code(),
            number_of_initial_units: element.number_of_initial_units(),
            number_of_accumulation_units: element.number_of_accumulation_units(),
            rate: element.rate(),
            price_date: element.price_date(),
            sum_of_units: element.sum_of_units(),
            sum_amount: element.sum_amount(),
        }
    }
}

/// Report sink writing a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonReportSink {
    type Error = SourceError;

    fn write(&mut self, contract: &Contract, valuation: &ContractValuation) -> Result<(), SourceError> {
        let document = ReportDocument::new(contract, valuation);

        let file = File::create(&self.path).map_err(|source| SourceError::io(&self.path, source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document)
            .map_err(|source| SourceError::json(&self.path, source))?;
        writer.flush().map_err(|source| SourceError::io(&self.path, source))?;

        info!(
            file = %self.path.display(),
            funds = document.funds.len(),
            warnings = valuation.warnings.len(),
            "Fund report written"
        );
        Ok(())
    }
}
