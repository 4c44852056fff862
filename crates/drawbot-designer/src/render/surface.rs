//! Drawing target abstraction.
//!
//! A [`Surface`] is a pixel-addressed 2-D target (origin top-left, y down)
//! exposing the minimal primitive set the renderer needs.

use crate::color::Rgba;
use crate::font_manager::FontSpec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    /// Full circle as its own closed sub-path.
    Circle { cx: f32, cy: f32, radius: f32 },
    Close,
}

/// Resolution-independent path handed to a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfacePath {
    ops: Vec<PathOp>,
}

impl SurfacePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.ops.push(PathOp::MoveTo(x, y));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.ops.push(PathOp::LineTo(x, y));
        self
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32) -> &mut Self {
        self.ops.push(PathOp::Circle { cx, cy, radius });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.ops.push(PathOp::Close);
        self
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Resolved stroke parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

/// Resolved text parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    pub font: FontSpec,
}

pub trait Surface {
    /// Pixel dimensions as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Resets every pixel to the surface background.
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &SurfacePath, style: &StrokeStyle);

    fn fill_path(&mut self, path: &SurfacePath, color: Rgba);

    /// Outlines the rectangle with top-left corner `(x, y)`.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &StrokeStyle);

    /// Draws `text` with its alphabetic baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}
