//! # Drawbot Core
//!
//! Core types and error handling shared by every drawbot crate.
//! Provides the drawing identifiers, the logical canvas constants,
//! and the command/validation error taxonomy.

pub mod constants;
pub mod error;
pub mod types;

pub use constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
pub use error::{CommandError, Error, Result};
pub use types::{DrawingId, OwnerId};
