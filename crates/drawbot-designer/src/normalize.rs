//! Legacy descriptor normalization.
//!
//! The generative service sometimes answers with action-tagged descriptors
//! instead of canonical shape commands. [`normalize`] rewrites the known
//! legacy encodings into canonical form and passes everything else through
//! untouched; validation happens afterwards in [`ShapeCommand::from_value`].
//!
//! Recognized encodings:
//! - `{"action": "draw_circle", "position": [x, y], "radius"?: r}`
//! - `{"action": "draw_line", "start": [x1, y1], "end": [x2, y2]}`

use drawbot_core::CommandError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::ShapeCommand;

/// Radius given to legacy circles that carry none.
pub const DEFAULT_LEGACY_RADIUS: f64 = 30.0;

/// Style fields carried over from a legacy descriptor when present.
const CARRIED_STYLE_FIELDS: [&str; 2] = ["color", "lineWidth"];

/// Rewrites a known legacy descriptor into canonical form.
///
/// Pure and idempotent: the output of a legacy mapping carries no `action`
/// tag, so normalizing it again returns it unchanged.
pub fn normalize(raw: &Value) -> Value {
    let Some(obj) = raw.as_object() else {
        return raw.clone();
    };

    let mapped = match obj.get("action").and_then(Value::as_str) {
        Some("draw_circle") => legacy_circle(obj),
        Some("draw_line") => legacy_line(obj),
        _ => None,
    };

    mapped.unwrap_or_else(|| raw.clone())
}

/// Normalizes then parses a single raw descriptor.
pub fn canonicalize(raw: &Value) -> Result<ShapeCommand, CommandError> {
    ShapeCommand::from_value(&normalize(raw))
}

/// A descriptor dropped during batch canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position of the descriptor in the raw batch.
    pub index: usize,
    pub error: CommandError,
}

/// Result of canonicalizing a raw batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canonicalized {
    pub commands: Vec<ShapeCommand>,
    pub rejected: Vec<Rejected>,
}

/// Canonicalizes every descriptor of a batch, keeping the valid ones in
/// order. Invalid descriptors are dropped with a diagnostic; one bad
/// descriptor never aborts the batch.
pub fn canonicalize_batch(raws: &[Value]) -> Canonicalized {
    let mut out = Canonicalized::default();
    for (index, raw) in raws.iter().enumerate() {
        match canonicalize(raw) {
            Ok(command) => out.commands.push(command),
            Err(error) => {
                warn!("Dropping shape descriptor #{}: {} ({})", index, error, raw);
                out.rejected.push(Rejected { index, error });
            }
        }
    }
    debug!(
        "Canonicalized batch: {} accepted, {} rejected",
        out.commands.len(),
        out.rejected.len()
    );
    out
}

fn legacy_circle(obj: &Map<String, Value>) -> Option<Value> {
    let position = obj.get("position")?.as_array()?;

    let radius = match obj.get("radius") {
        Some(r) if !is_falsy(r) => r.clone(),
        _ => Value::from(DEFAULT_LEGACY_RADIUS),
    };

    let mut out = Map::new();
    out.insert("shape".to_string(), Value::from("circle"));
    out.insert("x".to_string(), element(position, 0));
    out.insert("y".to_string(), element(position, 1));
    out.insert("radius".to_string(), radius);
    carry_style(obj, &mut out);
    Some(Value::Object(out))
}

fn legacy_line(obj: &Map<String, Value>) -> Option<Value> {
    let start = obj.get("start")?.as_array()?;
    let end = obj.get("end")?.as_array()?;

    let mut out = Map::new();
    out.insert("shape".to_string(), Value::from("line"));
    out.insert("x1".to_string(), element(start, 0));
    out.insert("y1".to_string(), element(start, 1));
    out.insert("x2".to_string(), element(end, 0));
    out.insert("y2".to_string(), element(end, 1));
    carry_style(obj, &mut out);
    Some(Value::Object(out))
}

// Short position arrays map to null, which the validator reports as a missing field.
fn element(values: &[Value], index: usize) -> Value {
    values.get(index).cloned().unwrap_or(Value::Null)
}

fn carry_style(from: &Map<String, Value>, to: &mut Map<String, Value>) {
    for field in CARRIED_STYLE_FIELDS {
        if let Some(value) = from.get(field).filter(|v| !v.is_null()) {
            to.insert(field.to_string(), value.clone());
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
