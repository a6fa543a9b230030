//! Typed access to raw JSON records
//!
//! Exported records are loosely typed: numbers sometimes arrive as strings,
//! codes sometimes as numbers, and absent values as `null`. These accessors
//! coerce what can be coerced and name the offending field otherwise.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use core_kernel::parse_decimal;

use crate::error::IngestError;

/// A JSON object together with the path it was found at, for error messages
#[derive(Debug, Clone, Copy)]
pub struct RecordObject<'a> {
    path: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> RecordObject<'a> {
    /// Wraps a JSON value that must be an object
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MalformedRecord` if `value` is not an object
    pub fn from_value(path: &'a str, value: &'a Value) -> Result<Self, IngestError> {
        value
            .as_object()
            .map(|fields| Self { path, fields })
            .ok_or_else(|| {
                let label = if path.is_empty() { "record" } else { path };
                IngestError::wrong_type(label, "an object")
            })
    }

    pub fn path(&self) -> &str {
        self.path
    }

    fn field_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn value(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Reads an optional text field; numbers are accepted as their text
    pub fn string(&self, name: &str) -> Result<Option<String>, IngestError> {
        match self.value(name) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(_) => Err(IngestError::wrong_type(&self.field_path(name), "text")),
        }
    }

    /// Reads a mandatory text field
    pub fn required_string(&self, name: &str) -> Result<String, IngestError> {
        self.string(name)?
            .ok_or_else(|| IngestError::missing(&self.field_path(name)))
    }

    /// Reads an optional decimal field; numeric text is accepted
    pub fn decimal(&self, name: &str) -> Result<Option<Decimal>, IngestError> {
        let raw = match self.value(name) {
            None => return Ok(None),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
            Some(Value::String(text)) => text.clone(),
            Some(_) => return Err(IngestError::wrong_type(&self.field_path(name), "a number")),
        };

        parse_decimal(&raw)
            .map(Some)
            .map_err(|err| IngestError::invalid(&self.field_path(name), err))
    }

    /// Reads a mandatory decimal field
    pub fn required_decimal(&self, name: &str) -> Result<Decimal, IngestError> {
        self.decimal(name)?
            .ok_or_else(|| IngestError::missing(&self.field_path(name)))
    }

    /// Reads a mandatory nested object
    pub fn object(&self, name: &'a str) -> Result<RecordObject<'a>, IngestError> {
        let value = self
            .value(name)
            .ok_or_else(|| IngestError::missing(&self.field_path(name)))?;
        value
            .as_object()
            .map(|fields| RecordObject { path: name, fields })
            .ok_or_else(|| IngestError::wrong_type(&self.field_path(name), "an object"))
    }

    /// Reads a mandatory array
    pub fn array(&self, name: &str) -> Result<&'a [Value], IngestError> {
        let value = self
            .value(name)
            .ok_or_else(|| IngestError::missing(&self.field_path(name)))?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| IngestError::wrong_type(&self.field_path(name), "an array"))
    }
}
