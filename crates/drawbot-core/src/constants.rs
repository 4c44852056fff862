//! Logical canvas dimensions.
//!
//! The model never clamps coordinates to these bounds; they size the
//! default rendering surface and are handed to the generative service.

/// Width of the logical drawing canvas in pixels
pub const CANVAS_WIDTH: u32 = 500;

/// Height of the logical drawing canvas in pixels
pub const CANVAS_HEIGHT: u32 = 500;
