//! Batch-level undo/redo.
//!
//! The unit of undo is the [`EditBatch`]: every command produced by one
//! instruction. Commands loaded from storage form a baseline that is not
//! undoable. At all times the baseline followed by the live batches on the
//! undo stack, in push order, equals the command sequence.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ShapeCommand;

/// Commands produced by one instruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditBatch {
    pub commands: Vec<ShapeCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EditBatch {
    pub fn new(commands: Vec<ShapeCommand>) -> Self {
        Self {
            commands,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl From<Vec<ShapeCommand>> for EditBatch {
    fn from(commands: Vec<ShapeCommand>) -> Self {
        EditBatch::new(commands)
    }
}

/// History as it stood right before a clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearedState {
    pub baseline: Vec<ShapeCommand>,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    Batch(EditBatch),
    /// A clear. On the undo stack it owns everything it wiped, so undoing
    /// it restores the prior batches with their boundaries intact.
    Clear(ClearedState),
}

impl HistoryEntry {
    pub fn description(&self) -> String {
        match self {
            HistoryEntry::Batch(batch) => match &batch.description {
                Some(d) => d.clone(),
                None if batch.len() == 1 => "Add 1 shape".to_string(),
                None => format!("Add {} shapes", batch.len()),
            },
            HistoryEntry::Clear(_) => "Clear drawing".to_string(),
        }
    }

    /// Number of commands this entry contributes to the sequence.
    fn live_len(&self) -> usize {
        match self {
            HistoryEntry::Batch(batch) => batch.len(),
            HistoryEntry::Clear(_) => 0,
        }
    }
}

/// Command sequence with its undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    commands: Vec<ShapeCommand>,
    baseline: Vec<ShapeCommand>,
    undo_stack: Vec<HistoryEntry>,
    /// Front is the most recently undone entry.
    redo_stack: VecDeque<HistoryEntry>,
    max_depth: Option<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `max_depth` undo entries. Older batches fold
    /// into the baseline and stop being undoable.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth.max(1)),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[ShapeCommand] {
        &self.commands
    }

    pub fn baseline(&self) -> &[ShapeCommand] {
        &self.baseline
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Appends a batch and makes it the newest undo entry.
    ///
    /// Empty batches are ignored. Any redo history is discarded.
    pub fn apply_batch(&mut self, batch: impl Into<EditBatch>) -> bool {
        let batch = batch.into();
        if batch.is_empty() {
            debug!("Ignoring empty batch");
            return false;
        }
        self.commands.extend(batch.commands.iter().cloned());
        self.undo_stack.push(HistoryEntry::Batch(batch));
        self.redo_stack.clear();
        self.trim_to_depth();
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };

        let redo_entry = match entry {
            HistoryEntry::Batch(batch) => {
                let keep = self.commands.len().saturating_sub(batch.len());
                self.commands.truncate(keep);
                HistoryEntry::Batch(batch)
            }
            HistoryEntry::Clear(state) => {
                self.baseline = state.baseline;
                self.undo_stack = state.entries;
                self.rebuild_commands();
                HistoryEntry::Clear(ClearedState::default())
            }
        };

        debug!("Undo: {}", redo_entry.description());
        self.redo_stack.push_front(redo_entry);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop_front() else {
            return false;
        };

        debug!("Redo: {}", entry.description());
        match entry {
            HistoryEntry::Batch(batch) => {
                self.commands.extend(batch.commands.iter().cloned());
                self.undo_stack.push(HistoryEntry::Batch(batch));
            }
            HistoryEntry::Clear(_) => self.collapse(),
        }
        self.trim_to_depth();
        true
    }

    /// Empties the drawing as one undoable step.
    ///
    /// Clearing an already-empty drawing does nothing.
    pub fn clear(&mut self) -> bool {
        if self.commands.is_empty() {
            return false;
        }
        self.collapse();
        self.redo_stack.clear();
        true
    }

    /// Replaces the drawing with `commands` as a non-undoable baseline.
    pub fn reset(&mut self, commands: Vec<ShapeCommand>) {
        self.baseline = commands.clone();
        self.commands = commands;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    /// Redo entries, next to be redone first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.redo_stack.iter()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(HistoryEntry::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.front().map(HistoryEntry::description)
    }

    // Moves the baseline and the whole undo stack into a single clear entry.
    fn collapse(&mut self) {
        let state = ClearedState {
            baseline: std::mem::take(&mut self.baseline),
            entries: std::mem::take(&mut self.undo_stack),
        };
        self.commands.clear();
        self.undo_stack.push(HistoryEntry::Clear(state));
    }

    fn rebuild_commands(&mut self) {
        let mut commands = self.baseline.clone();
        for entry in &self.undo_stack {
            if let HistoryEntry::Batch(batch) = entry {
                commands.extend(batch.commands.iter().cloned());
            }
        }
        self.commands = commands;
    }

    fn trim_to_depth(&mut self) {
        let Some(max) = self.max_depth else {
            return;
        };
        while self.undo_stack.len() > max {
            let oldest = self.undo_stack.remove(0);
            debug!(
                "History depth exceeded, folding '{}' ({} commands) into baseline",
                oldest.description(),
                oldest.live_len()
            );
            if let HistoryEntry::Batch(batch) = oldest {
                self.baseline.extend(batch.commands);
            }
        }
    }
}
