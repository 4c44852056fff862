//! Cleanup of model-written JSON.
//!
//! Language models like to annotate their JSON with `//` comments and wrap
//! it in markdown fences. Both are removed before parsing.

use serde_json::Value;

use crate::GeneratorError;

/// Strips comments, markdown fences and blank lines from `text`.
///
/// Full-line `//` comments are dropped. A trailing `//` comment is cut
/// only when it starts outside a JSON string, so URLs and other text
/// containing `//` inside string values survive.
pub fn sanitize_payload(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && !trimmed.starts_with("```")
        })
        .map(|line| strip_trailing_comment(line).trim_end())
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return &line[..i];
        }
    }
    line
}

/// Sanitizes `text` and parses it as a batch of raw shape descriptors.
///
/// Prose around the outermost `[...]` is tolerated. Anything that is not a
/// JSON array is an [`GeneratorError::InvalidPayload`].
pub fn parse_batch(text: &str) -> Result<Vec<Value>, GeneratorError> {
    let cleaned = sanitize_payload(text);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => return Ok(items),
        Ok(other) => {
            return Err(GeneratorError::invalid_payload(format!(
                "expected a JSON array, got {}",
                kind_of(&other)
            )))
        }
        Err(_) => {}
    }

    let (Some(start), Some(end)) = (cleaned.find('['), cleaned.rfind(']')) else {
        return Err(GeneratorError::invalid_payload("no JSON array found"));
    };
    if end < start {
        return Err(GeneratorError::invalid_payload("no JSON array found"));
    }

    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(GeneratorError::invalid_payload(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(GeneratorError::invalid_payload(e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
