use drawbot_core::{DrawingId, OwnerId};
use drawbot_designer::ShapeCommand;
use tracing::{debug, info};

use crate::drawing::{parse_id, NewDrawing};
use crate::envelope::unwrap_sequence;
use crate::{Drawing, DrawingBackend, StorageError};

/// Save/load contract between a session and a storage backend.
///
/// A save always creates a new stored drawing with a fresh id. A load
/// returns the commands in the order they were saved.
pub struct DrawingGateway<B> {
    backend: B,
}

impl<B: DrawingBackend> DrawingGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn save(
        &self,
        owner: OwnerId,
        title: &str,
        commands: &[ShapeCommand],
    ) -> Result<DrawingId, StorageError> {
        let payload = serde_json::to_value(NewDrawing::new(owner, title, commands)?)?;
        let answer = self.backend.post_drawing(&payload).await?;
        let id = parse_id(&answer)?;
        info!(
            "Saved drawing {} '{}' for owner {} ({} commands)",
            id,
            title,
            owner,
            commands.len()
        );
        Ok(id)
    }

    pub async fn load(&self, id: DrawingId) -> Result<Drawing, StorageError> {
        let value = self
            .backend
            .get_drawing(id)
            .await?
            .ok_or(StorageError::NotFound(id))?;
        let drawing = Drawing::from_value(&value)?;
        debug!("Loaded drawing {} ({} commands)", id, drawing.commands.len());
        Ok(drawing)
    }

    /// Every drawing of `owner`, in the order the backend lists them.
    ///
    /// One undecodable drawing fails the whole listing.
    pub async fn load_all_by_owner(&self, owner: OwnerId) -> Result<Vec<Drawing>, StorageError> {
        let listing = self.backend.get_owner_drawings(owner).await?;
        unwrap_sequence(&listing)?
            .iter()
            .map(Drawing::from_value)
            .collect()
    }
}
