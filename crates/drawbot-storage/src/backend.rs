use async_trait::async_trait;
use drawbot_core::{DrawingId, OwnerId};
use serde_json::Value;

use crate::StorageError;

/// Raw CRUD store for drawings.
///
/// Backends deal in JSON as it travels on the wire, envelopes included.
/// Decoding and envelope unwrapping belong to [`crate::DrawingGateway`].
#[async_trait]
pub trait DrawingBackend: Send + Sync {
    /// Stores a new drawing and answers with its id (as the backend
    /// encodes it).
    async fn post_drawing(&self, payload: &Value) -> Result<Value, StorageError>;

    /// Fetches one drawing, `None` when no drawing has that id.
    async fn get_drawing(&self, id: DrawingId) -> Result<Option<Value>, StorageError>;

    /// Fetches every drawing owned by `owner`.
    async fn get_owner_drawings(&self, owner: OwnerId) -> Result<Value, StorageError>;
}

#[async_trait]
impl<T: DrawingBackend + ?Sized> DrawingBackend for Box<T> {
    async fn post_drawing(&self, payload: &Value) -> Result<Value, StorageError> {
        (**self).post_drawing(payload).await
    }

    async fn get_drawing(&self, id: DrawingId) -> Result<Option<Value>, StorageError> {
        (**self).get_drawing(id).await
    }

    async fn get_owner_drawings(&self, owner: OwnerId) -> Result<Value, StorageError> {
        (**self).get_owner_drawings(owner).await
    }
}
