//! Sequence envelope unwrapping.
//!
//! Reference-preserving serializers do not emit sequences as plain arrays.
//! A list arrives as `{"$id": "2", "$values": [...]}`, and some stores hand
//! back index-keyed objects (`{"0": ..., "1": ...}`). Everything past this
//! module sees a plain `Vec`.

use serde_json::{Map, Value};

use crate::StorageError;

/// Key carrying the wrapped array.
pub const VALUES_KEY: &str = "$values";
/// Key carrying the reference id of a wrapped value.
pub const ID_KEY: &str = "$id";

/// Unwraps a sequence in any of the accepted shapes.
///
/// Accepts a plain array, a `$values` envelope (other `$`-prefixed
/// metadata keys such as `$id` are ignored) and an index-keyed object whose
/// keys are exactly `0..n`. Anything else is an
/// [`StorageError::EnvelopeMismatch`].
pub fn unwrap_sequence(value: &Value) -> Result<Vec<Value>, StorageError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::Object(obj) => {
            if let Some(inner) = obj.get(VALUES_KEY) {
                return match inner {
                    Value::Array(items) => Ok(items.clone()),
                    other => Err(mismatch(format!("$values holding {}", describe(other)))),
                };
            }
            unwrap_indexed(obj)
        }
        other => Err(mismatch(describe(other).to_string())),
    }
}

fn unwrap_indexed(obj: &Map<String, Value>) -> Result<Vec<Value>, StorageError> {
    let mut slots: Vec<Option<&Value>> = vec![None; obj.len()];

    for (key, value) in obj {
        if key.starts_with('$') {
            return Err(mismatch(format!("object with metadata key '{}'", key)));
        }
        let index: usize = key
            .parse()
            .map_err(|_| mismatch(format!("object with key '{}'", key)))?;
        match slots.get_mut(index) {
            Some(slot) if slot.is_none() => *slot = Some(value),
            _ => {
                return Err(mismatch(format!(
                    "object with duplicate or out-of-range index {}",
                    index
                )))
            }
        }
    }

    // Every slot is filled: keys are distinct and all below `len`.
    Ok(slots.into_iter().flatten().cloned().collect())
}

fn mismatch(found: String) -> StorageError {
    StorageError::EnvelopeMismatch { found }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
