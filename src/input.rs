//! Validation of raw JSON data sets handed to the runners.

use serde_json::Value;

use crate::error::{Error, Result};

/// Elements of a data set: the items of an array, or the property values of
/// an object in insertion order. Any other value is rejected.
pub(crate) fn records(data: &Value) -> Result<Vec<&Value>> {
    match data {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(fields) => Ok(fields.values().collect()),
        other => Err(Error::invalid_input(format!(
            "expected an array or object of records, got {}",
            kind(other)
        ))),
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
