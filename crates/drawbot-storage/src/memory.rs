//! In-process backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use drawbot_core::{DrawingId, OwnerId};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::envelope::{ID_KEY, VALUES_KEY};
use crate::{DrawingBackend, StorageError};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    drawings: BTreeMap<i64, Value>,
}

/// Backend keeping drawings in memory.
///
/// With reference preservation on, every answer is encoded the way a
/// reference-preserving serializer would: objects gain a `$id` and arrays
/// become `{"$id": .., "$values": [..]}` envelopes.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    preserve_references: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_preservation() -> Self {
        Self {
            preserve_references: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `value` verbatim under `id`, bypassing the save path.
    pub fn insert_raw(&self, id: DrawingId, value: Value) {
        let mut state = self.state.lock();
        state.next_id = state.next_id.max(id.value());
        state.drawings.insert(id.value(), value);
    }

    fn encode(&self, value: Value) -> Value {
        if self.preserve_references {
            let mut counter = 0;
            preserve(value, &mut counter)
        } else {
            value
        }
    }
}

fn preserve(value: Value, counter: &mut u64) -> Value {
    match value {
        Value::Array(items) => {
            *counter += 1;
            let id = counter.to_string();
            let items = items.into_iter().map(|v| preserve(v, counter)).collect();
            let mut obj = Map::new();
            obj.insert(ID_KEY.to_string(), Value::from(id));
            obj.insert(VALUES_KEY.to_string(), Value::Array(items));
            Value::Object(obj)
        }
        Value::Object(fields) => {
            *counter += 1;
            let mut obj = Map::new();
            obj.insert(ID_KEY.to_string(), Value::from(counter.to_string()));
            for (key, v) in fields {
                obj.insert(key, preserve(v, counter));
            }
            Value::Object(obj)
        }
        scalar => scalar,
    }
}

fn owner_of(drawing: &Value) -> Option<i64> {
    drawing
        .get("ownerId")
        .or_else(|| drawing.get("userId"))
        .and_then(Value::as_i64)
}

#[async_trait]
impl DrawingBackend for MemoryBackend {
    async fn post_drawing(&self, payload: &Value) -> Result<Value, StorageError> {
        let Value::Object(fields) = payload else {
            return Err(StorageError::malformed("drawing payload must be an object"));
        };

        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;

        let mut stored = fields.clone();
        stored.insert("id".to_string(), Value::from(id));
        state.drawings.insert(id, Value::Object(stored));
        debug!("Stored drawing {}", id);
        Ok(Value::from(id))
    }

    async fn get_drawing(&self, id: DrawingId) -> Result<Option<Value>, StorageError> {
        let found = self.state.lock().drawings.get(&id.value()).cloned();
        Ok(found.map(|drawing| self.encode(drawing)))
    }

    async fn get_owner_drawings(&self, owner: OwnerId) -> Result<Value, StorageError> {
        let drawings: Vec<Value> = self
            .state
            .lock()
            .drawings
            .values()
            .filter(|d| owner_of(d) == Some(owner.value()))
            .cloned()
            .collect();
        Ok(self.encode(Value::Array(drawings)))
    }
}
