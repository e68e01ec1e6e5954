//! Empty-string normalization for build records
//!
//! DynamoDB clients reject empty strings in several positions, so every
//! empty-string field value is rewritten to `null` before a record is stored.
//!
//! Traversal:
//! - object values are normalized recursively
//! - array elements that are strings are kept verbatim (even `""`)
//! - other array elements are normalized (objects and nested arrays)
//! - an empty-string field value becomes `null`
//! - everything else (numbers, `false`, `"  "`, ...) is left as is

use crate::error::{Error, Result};
use crate::types::{BuildRecord, JsonObject, JsonValue};

/// Normalize a decoded record, rejecting anything that is not a JSON object.
pub fn normalize_value(value: JsonValue) -> Result<BuildRecord> {
    match value {
        JsonValue::Object(record) => Ok(normalize(record)),
        other => Err(Error::invalid_input(format!(
            "build record must be a JSON object, got {}",
            kind(&other)
        ))),
    }
}

/// Normalize a record, returning the rewritten record.
///
/// Idempotent: normalizing twice gives the same result as once.
pub fn normalize(record: BuildRecord) -> BuildRecord {
    normalize_object(record)
}

/// Borrowing variant of [`normalize`]; the input is left untouched.
pub fn normalized(record: &BuildRecord) -> BuildRecord {
    normalize(record.clone())
}

fn normalize_object(object: JsonObject) -> JsonObject {
    object
        .into_iter()
        .map(|(key, value)| (key, normalize_field(value)))
        .collect()
}

fn normalize_field(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(normalize_object(object)),
        JsonValue::Array(items) => JsonValue::Array(normalize_items(items)),
        JsonValue::String(s) if s.is_empty() => JsonValue::Null,
        other => other,
    }
}

fn normalize_items(items: Vec<JsonValue>) -> Vec<JsonValue> {
    items
        .into_iter()
        .map(|item| match item {
            JsonValue::Object(object) => JsonValue::Object(normalize_object(object)),
            JsonValue::Array(nested) => JsonValue::Array(normalize_items(nested)),
            other => other,
        })
        .collect()
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
