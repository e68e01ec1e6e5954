//! JSON ⇄ DynamoDB `AttributeValue` conversion

use crate::types::{BuildRecord, JsonValue};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// Convert a record into a DynamoDB item
pub fn record_to_item(record: &BuildRecord) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .map(|(k, v)| (k.clone(), json_to_attr(v)))
        .collect()
}

/// Convert a DynamoDB item back into a record
///
/// Binary attributes have no JSON form and are dropped.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> BuildRecord {
    item.iter()
        .filter_map(|(k, v)| attr_to_json(v).map(|json| (k.clone(), json)))
        .collect()
}

/// Convert a single JSON value to an `AttributeValue`
pub fn json_to_attr(value: &JsonValue) -> AttributeValue {
    match value {
        JsonValue::Null => AttributeValue::Null(true),
        JsonValue::Bool(b) => AttributeValue::Bool(*b),
        JsonValue::Number(n) => AttributeValue::N(n.to_string()),
        JsonValue::String(s) => AttributeValue::S(s.clone()),
        JsonValue::Array(items) => AttributeValue::L(items.iter().map(json_to_attr).collect()),
        JsonValue::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attr(v)))
                .collect(),
        ),
    }
}

/// Convert a single `AttributeValue` to JSON
pub fn attr_to_json(attr: &AttributeValue) -> Option<JsonValue> {
    match attr {
        AttributeValue::S(s) => Some(JsonValue::String(s.clone())),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Some(JsonValue::Bool(*b)),
        AttributeValue::Null(_) => Some(JsonValue::Null),
        AttributeValue::L(items) => Some(JsonValue::Array(
            items.iter().filter_map(attr_to_json).collect(),
        )),
        AttributeValue::M(map) => Some(JsonValue::Object(
            map.iter()
                .filter_map(|(k, v)| attr_to_json(v).map(|json| (k.clone(), json)))
                .collect(),
        )),
        AttributeValue::Ss(items) => Some(JsonValue::Array(
            items.iter().cloned().map(JsonValue::String).collect(),
        )),
        AttributeValue::Ns(items) => Some(JsonValue::Array(
            items.iter().filter_map(|n| number_to_json(n)).collect(),
        )),
        _ => None,
    }
}

/// Convert a DynamoDB decimal string into a JSON number.
///
/// Values without a fractional part come back as integers (`"3.0"` → `3`,
/// `"1.5E+3"` → `1500`), anything else as a float (`"3.5"` → `3.5`).
/// Integral values outside the `i64`/`u64` range fall back to the nearest
/// float, since `serde_json` numbers carry at most 64 bits.
pub fn number_to_json(n: &str) -> Option<JsonValue> {
    let n = n.trim();
    if let Some(i) = integral_decimal(n) {
        if let Ok(v) = i64::try_from(i) {
            return Some(JsonValue::from(v));
        }
        if let Ok(v) = u64::try_from(i) {
            return Some(JsonValue::from(v));
        }
    }

    let f = n.parse::<f64>().ok()?;
    serde_json::Number::from_f64(f).map(JsonValue::Number)
}

/// Exact value of a decimal string with no fractional part
///
/// Returns `None` for fractional values and for anything beyond `i128`.
fn integral_decimal(n: &str) -> Option<i128> {
    let (mantissa, exponent) = match n.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&n[..idx], n[idx + 1..].parse::<i32>().ok()?),
        None => (n, 0),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = format!("{whole}{fraction}");
    let scale = exponent.checked_sub(i32::try_from(fraction.len()).ok()?)?;
    if scale < 0 {
        let dropped = scale.unsigned_abs() as usize;
        let Some(cut) = digits.len().checked_sub(dropped) else {
            // Every digit is after the point
            return digits.bytes().all(|b| b == b'0').then_some(0);
        };
        if !digits[cut..].bytes().all(|b| b == b'0') {
            return None;
        }
        digits.truncate(cut);
    } else if scale > 0 {
        // i128 holds at most 39 digits
        if scale > 39 {
            return digits.bytes().all(|b| b == b'0').then_some(0);
        }
        digits.push_str(&"0".repeat(scale as usize));
    }
    if digits.is_empty() {
        return Some(0);
    }

    let value = digits.parse::<i128>().ok()?;
    Some(if negative { -value } else { value })
}
