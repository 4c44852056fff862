//! # Drawbot Designer
//!
//! This crate holds the drawing engine behind drawbot: the shape-command
//! model, the normalizer for legacy descriptors, the render pipeline and the
//! batch-level edit history.
//!
//! ## Core Components
//!
//! - **Model**: circle, rect, line, triangle and text commands with validation
//! - **Normalize**: maps action-tagged legacy descriptors onto the model
//! - **Render**: full-repaint renderer over a [`Surface`], with a fit-to-frame
//!   preview and a tiny-skia raster surface
//! - **History**: undo/redo where one instruction's batch is one step
//! - **Session**: a drawing, its history and its instruction log
//!
//! ## Architecture
//!
//! ```text
//! raw descriptors ──normalize──> ShapeCommand batch
//!                                   └── EditHistory (undo/redo)
//!                                         └── Renderer ──> Surface
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawbot_designer::{DrawingSession, PixmapSurface, Renderer};
//! use drawbot_core::OwnerId;
//!
//! let mut session = DrawingSession::new(OwnerId::new(1));
//! session.apply_instruction_batch("a sun", &raw_batch);
//!
//! let mut surface = PixmapSurface::new(500, 500)?;
//! session.render(&Renderer::default(), &mut surface);
//! surface.save_png("drawing.png")?;
//! ```

pub mod color;
pub mod font_manager;
pub mod history;
pub mod model;
pub mod normalize;
pub mod render;
pub mod session;

pub use color::Rgba;
pub use font_manager::{FontSpec, DEFAULT_FONT};
pub use history::{ClearedState, EditBatch, EditHistory, HistoryEntry};
pub use model::{
    CircleCommand, LineCommand, RectCommand, ShapeCommand, ShapeGeometry, ShapeKind,
    TextCommand, TriangleCommand,
};
pub use normalize::{canonicalize, canonicalize_batch, normalize, Canonicalized, Rejected};
pub use render::{
    preview_scale, DrawOp, PixmapSurface, RecordingSurface, RenderOptions, RenderStats, Renderer,
    Surface,
};
pub use session::DrawingSession;
