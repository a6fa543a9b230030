//! Rate file source
//!
//! Published unit rates are kept in a property file, either in the XML
//! properties format
//!
//! ```xml
//! <properties>
//!   <entry key="RATES_DATE">2019.01.31</entry>
//!   <entry key="Globális Részvény Alap">1.4567</entry>
//! </properties>
//! ```
//!
//! or as plain `key=value` lines with `#` and `!` comments. The
//! `RATES_DATE` entry dates the rates; every other entry is a fund label
//! and its rate.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use core_kernel::parse_decimal;
use domain_fund::{FundRate, RateSource, RateTable};

use crate::error::SourceError;

/// Key of the entry holding the date the rates were published for
pub const RATES_DATE_KEY: &str = "RATES_DATE";

/// A rate file on disk
#[derive(Debug, Clone)]
pub struct RateFile {
    path: PathBuf,
}

impl RateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses rate file content
    ///
    /// Content starting with `<` is read as XML properties, anything else
    /// as `key=value` lines.
    ///
    /// # Arguments
    ///
    /// * `path` - Where the content came from, for error messages
    /// * `content` - The file content
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Xml` or `SourceError::RateFile` if XML content
    /// is not well-formed
    pub fn parse(path: &Path, content: &str) -> Result<RateTable, SourceError> {
        let entries = if content.trim_start().starts_with('<') {
            parse_xml_properties(path, content)?
        } else {
            parse_key_values(content)
        };

        Ok(build_table(path, entries))
    }
}

impl RateSource for RateFile {
    type Error = SourceError;

    fn load_rates(&self) -> Result<RateTable, SourceError> {
        let content =
            fs::read_to_string(&self.path).map_err(|source| SourceError::io(&self.path, source))?;
        let table = Self::parse(&self.path, &content)?;

        debug!(
            file = %self.path.display(),
            rates = table.rates().len(),
            "Using exchange rates for active funds from file"
        );
        Ok(table)
    }
}

fn parse_xml_properties(path: &Path, content: &str) -> Result<Vec<(String, String)>, SourceError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current_key: Option<String> = None;
    let mut value = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"entry" => {
                current_key = Some(entry_key(path, e)?);
                value.clear();
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"entry" => {
                entries.push((entry_key(path, e)?, String::new()));
            }
            Ok(Event::Text(ref e)) if current_key.is_some() => {
                let raw = String::from_utf8_lossy(e);
                let text = unescape(&raw)
                    .map_err(|err| SourceError::rate_file(path, err.to_string()))?;
                value.push_str(&text);
            }
            Ok(Event::CData(ref e)) if current_key.is_some() => {
                value.push_str(&String::from_utf8_lossy(e));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"entry" => {
                if let Some(key) = current_key.take() {
                    entries.push((key, value.trim().to_string()));
                }
            }
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(SourceError::Xml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn entry_key(path: &Path, element: &quick_xml::events::BytesStart<'_>) -> Result<String, SourceError> {
    for attr in element.attributes().flatten() {
        if attr.key.as_ref() == b"key" {
            let raw = String::from_utf8_lossy(&attr.value);
            return unescape(&raw)
                .map(|key| key.into_owned())
                .map_err(|err| SourceError::rate_file(path, err.to_string()));
        }
    }
    Err(SourceError::rate_file(path, "entry without a key attribute"))
}

fn parse_key_values(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn build_table(path: &Path, entries: Vec<(String, String)>) -> RateTable {
    let mut rate_date = None;
    let mut rates = Vec::new();

    for (key, value) in entries {
        if key == RATES_DATE_KEY {
            rate_date = Some(value).filter(|date| !date.is_empty());
            continue;
        }
        if value.is_empty() {
            continue;
        }
        match parse_decimal(&value) {
            Ok(rate) => rates.push(FundRate::new(key, rate)),
            Err(err) => warn!(file = %path.display(), fund = %key, error = %err, "Ignoring unparsable exchange rate"),
        }
    }

    RateTable::new(rate_date, rates)
}
