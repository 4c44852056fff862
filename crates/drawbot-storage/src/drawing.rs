//! Stored drawing and its wire encoding.

use chrono::{DateTime, NaiveDateTime, Utc};
use drawbot_core::{DrawingId, OwnerId};
use drawbot_designer::ShapeCommand;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::envelope::unwrap_sequence;
use crate::StorageError;

/// Key holding a command's position within its drawing.
pub const SEQUENCE_KEY: &str = "sequence";

/// A drawing as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub id: DrawingId,
    pub title: String,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub commands: Vec<ShapeCommand>,
}

/// Payload posted when saving. Commands carry their `sequence` index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewDrawing<'a> {
    pub title: &'a str,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub commands: Vec<Value>,
}

impl<'a> NewDrawing<'a> {
    pub fn new(
        owner: OwnerId,
        title: &'a str,
        commands: &[ShapeCommand],
    ) -> Result<Self, StorageError> {
        let commands = commands
            .iter()
            .enumerate()
            .map(|(sequence, command)| -> serde_json::Result<Value> {
                let mut value = command.to_value()?;
                if let Value::Object(obj) = &mut value {
                    obj.insert(SEQUENCE_KEY.to_string(), Value::from(sequence));
                }
                Ok(value)
            })
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(Self {
            title,
            owner_id: owner,
            created_at: Utc::now(),
            commands,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawingRecord {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(alias = "userId")]
    owner_id: i64,
    created_at: String,
    #[serde(default)]
    commands: Option<Value>,
}

impl Drawing {
    /// Decodes a stored drawing.
    ///
    /// The command list may arrive in any envelope accepted by
    /// [`unwrap_sequence`]. Commands are ordered by their `sequence` index
    /// when every one carries it, otherwise by position. Commands that fail
    /// validation are dropped with a warning.
    pub fn from_value(value: &Value) -> Result<Self, StorageError> {
        let record: DrawingRecord = serde_json::from_value(value.clone())
            .map_err(|e| StorageError::malformed(e.to_string()))?;

        // An absent or null list is not an empty drawing.
        let raw_commands = match &record.commands {
            Some(commands) => unwrap_sequence(commands)?,
            None => {
                return Err(StorageError::EnvelopeMismatch {
                    found: "no commands".to_string(),
                })
            }
        };

        Ok(Self {
            id: DrawingId::new(record.id),
            title: record.title.unwrap_or_default(),
            owner_id: OwnerId::new(record.owner_id),
            created_at: parse_timestamp(&record.created_at)?,
            commands: decode_commands(DrawingId::new(record.id), raw_commands),
        })
    }
}

fn decode_commands(id: DrawingId, mut raws: Vec<Value>) -> Vec<ShapeCommand> {
    let sequences: Option<Vec<i64>> = raws
        .iter()
        .map(|raw| raw.get(SEQUENCE_KEY).and_then(Value::as_i64))
        .collect();
    if let Some(sequences) = sequences {
        let mut keyed: Vec<(i64, Value)> = sequences.into_iter().zip(raws).collect();
        keyed.sort_by_key(|(sequence, _)| *sequence);
        raws = keyed.into_iter().map(|(_, raw)| raw).collect();
    }

    raws.iter()
        .enumerate()
        .filter_map(|(index, raw)| match ShapeCommand::from_value(raw) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Drawing {}: dropping stored command #{}: {}", id, index, e);
                None
            }
        })
        .collect()
}

// Accepts RFC 3339 and the zone-less ISO form some stores emit, read as UTC.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| StorageError::malformed(format!("createdAt '{}': {}", s, e)))
}

/// Reads the id a backend answered a save with.
pub(crate) fn parse_id(value: &Value) -> Result<DrawingId, StorageError> {
    let id = match value {
        Value::Number(n) => n.as_i64().map(DrawingId::new),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(obj) => match obj.get("id") {
            Some(inner) => return parse_id(inner),
            None => None,
        },
        _ => None,
    };
    id.ok_or_else(|| StorageError::malformed(format!("save response is not an id: {}", value)))
}
