//! One THOR JSON log record per line.

use crate::error::ConvertError;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// A single parsed record. Fields are looked up by name; nothing beyond
/// the JSON object shape is validated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanRecord {
    fields: Map<String, Value>,
}

impl ScanRecord {
    /// Parse one line. Anything other than a JSON object is an error.
    pub fn from_json_line(line: &str) -> Result<Self, ConvertError> {
        match serde_json::from_str::<Value>(line)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ConvertError::NotAnObject),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Strings come back verbatim, every other value as compact JSON text.
    pub fn rendered(&self, key: &str) -> Option<Cow<'_, str>> {
        self.fields.get(key).map(|value| match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_owned(), Value::String(value.into()));
    }
}

impl From<Map<String, Value>> for ScanRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
