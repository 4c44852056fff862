//! Interactive drawing session.

use drawbot_core::{DrawingId, OwnerId};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::history::{EditBatch, EditHistory};
use crate::model::ShapeCommand;
use crate::normalize::{canonicalize_batch, Canonicalized};
use crate::render::{RenderStats, Renderer, Surface};

/// Title given to drawings that were never named.
pub const UNTITLED: &str = "Untitled";

/// One user's working drawing: the command sequence, its history and the
/// instructions that produced it.
///
/// Every mutation takes `&mut self`, so a caller cannot start a second
/// instruction while one is still being applied.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    id: Uuid,
    owner: OwnerId,
    title: String,
    source: Option<DrawingId>,
    history: EditHistory,
    instructions: Vec<String>,
}

impl DrawingSession {
    pub fn new(owner: OwnerId) -> Self {
        Self::with_history(owner, EditHistory::new())
    }

    pub fn with_history(owner: OwnerId, history: EditHistory) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title: UNTITLED.to_string(),
            source: None,
            history,
            instructions: Vec::new(),
        }
    }

    /// Process-local session id, used in log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Stored drawing this session was loaded from, if any.
    pub fn source(&self) -> Option<DrawingId> {
        self.source
    }

    pub fn commands(&self) -> &[ShapeCommand] {
        self.history.commands()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Instructions already carried out, oldest first.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Records `instruction` and applies the generated descriptors as one batch.
    ///
    /// Descriptors that fail to canonicalize are dropped and reported in the
    /// returned value. The instruction is remembered even when nothing
    /// survived, since the generator did answer it.
    pub fn apply_instruction_batch(&mut self, instruction: &str, raws: &[Value]) -> Canonicalized {
        let result = canonicalize_batch(raws);
        let instruction = instruction.trim().to_string();

        let batch = EditBatch::new(result.commands.clone()).with_description(instruction.clone());
        if self.history.apply_batch(batch) {
            info!(
                "Session {}: '{}' added {} shape(s)",
                self.id,
                instruction,
                result.commands.len()
            );
        }
        self.instructions.push(instruction);
        result
    }

    pub fn apply_batch(&mut self, batch: impl Into<EditBatch>) -> bool {
        self.history.apply_batch(batch)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn clear(&mut self) -> bool {
        self.history.clear()
    }

    /// Replaces the session contents with a stored drawing.
    ///
    /// The loaded commands become the non-undoable baseline and the
    /// instruction log starts over.
    pub fn load_drawing(
        &mut self,
        id: DrawingId,
        title: impl Into<String>,
        commands: Vec<ShapeCommand>,
    ) {
        info!(
            "Session {}: loaded drawing {} ({} commands)",
            self.id,
            id,
            commands.len()
        );
        self.history.reset(commands);
        self.title = title.into();
        self.source = Some(id);
        self.instructions.clear();
    }

    /// Marks the session as persisted under `id`.
    pub fn mark_saved(&mut self, id: DrawingId) {
        self.source = Some(id);
    }

    pub fn render<S: Surface + ?Sized>(&self, renderer: &Renderer, surface: &mut S) -> RenderStats {
        renderer.render(surface, self.commands())
    }

    pub fn render_preview<S: Surface + ?Sized>(
        &self,
        renderer: &Renderer,
        surface: &mut S,
    ) -> RenderStats {
        renderer.render_preview(surface, self.commands())
    }
}
