//! Display-list surface.

use super::surface::{StrokeStyle, Surface, SurfacePath, TextStyle};
use crate::color::Rgba;

/// One primitive recorded by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokePath {
        path: SurfacePath,
        style: StrokeStyle,
    },
    FillPath {
        path: SurfacePath,
        color: Rgba,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: StrokeStyle,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Surface that records primitives in draw order instead of rasterizing them.
///
/// Clearing discards everything recorded so far, exactly as clearing a
/// pixel surface discards what was painted.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            clears: 0,
        }
    }

    /// Primitives drawn since the last clear, preceded by that clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Primitives drawn since the last clear, without the clear marker.
    pub fn drawn(&self) -> Vec<&DrawOp> {
        self.ops.iter().filter(|op| **op != DrawOp::Clear).collect()
    }

    /// Number of times the surface has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.clears += 1;
    }

    fn stroke_path(&mut self, path: &SurfacePath, style: &StrokeStyle) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            style: *style,
        });
    }

    fn fill_path(&mut self, path: &SurfacePath, color: Rgba) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &StrokeStyle) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            style: *style,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }
}
