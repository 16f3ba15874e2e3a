// File: src/result.rs
// Purpose: Validator outcomes and the aggregated record/form error reports

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::{default_path_separator, DEFAULT_RECORD_ERRORS_KEY};
use crate::path;

/// Outcome of a single validator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub succeeded: bool,
    pub message: String,
    /// Opaque tag chosen by the validator, passed through untouched
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success(kind: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: String::new(),
            kind: kind.into(),
        }
    }

    /// Create a failed validation result
    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            kind: kind.into(),
        }
    }

    /// Replace the message, keeping the outcome
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Failing record rules, keyed by record name
///
/// Only failing keys are present; a fully passing record set is reported as
/// `None` by the engine instead of an empty map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValidationResult {
    #[serde(rename = "recordErrors")]
    pub record_errors: BTreeMap<String, String>,
}

impl RecordValidationResult {
    /// Get the error message for a record key
    pub fn get_error(&self, key: &str) -> Option<&str> {
        self.record_errors.get(key).map(|s| s.as_str())
    }
}

/// Error report for a whole form
///
/// `fields` mirrors the dot segments of every declared field path; each leaf
/// holds the field's message, or `""` when that field passed. `record_errors`
/// holds every declared record key the same way. Serializes to the flat
/// `{ <tree>..., "recordErrors": {...} }` shape form renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormValidationResult {
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    #[serde(rename = "recordErrors")]
    pub record_errors: BTreeMap<String, String>,

    #[serde(skip, default = "default_path_separator")]
    separator: char,
}

impl FormValidationResult {
    pub(crate) fn new(separator: char) -> Self {
        Self {
            fields: Map::new(),
            record_errors: BTreeMap::new(),
            separator,
        }
    }

    /// Message for a field path, `Some("")` if the field was declared and passed
    pub fn field_error(&self, field_path: &str) -> Option<&str> {
        let mut segments = path::segments(field_path, self.separator);
        let first = segments.next()?;
        let mut node = self.fields.get(first)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    /// Message for a record key, `Some("")` if the record was declared and passed
    pub fn record_error(&self, key: &str) -> Option<&str> {
        self.record_errors.get(key).map(|s| s.as_str())
    }

    /// Whether any declared field or record carries a non-empty message
    pub fn has_errors(&self) -> bool {
        fn any_message(value: &Value) -> bool {
            match value {
                Value::String(s) => !s.is_empty(),
                Value::Object(map) => map.values().any(any_message),
                _ => false,
            }
        }
        self.fields.values().any(any_message) || self.record_errors.values().any(|m| !m.is_empty())
    }

    /// Render as a JSON object using the default `recordErrors` key
    pub fn to_value(&self) -> Value {
        self.to_value_with_key(DEFAULT_RECORD_ERRORS_KEY)
    }

    /// Render as a JSON object, placing record errors under `record_errors_key`
    pub fn to_value_with_key(&self, record_errors_key: &str) -> Value {
        let mut object = self.fields.clone();
        let records = self
            .record_errors
            .iter()
            .map(|(key, message)| (key.clone(), Value::String(message.clone())))
            .collect::<Map<String, Value>>();
        object.insert(record_errors_key.to_string(), Value::Object(records));
        Value::Object(object)
    }
}
