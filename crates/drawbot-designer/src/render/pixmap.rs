//! Raster surface backed by a tiny-skia pixmap.

use std::path::Path;

use drawbot_core::{Error, Result};
use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Scale};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::warn;

use super::surface::{PathOp, StrokeStyle, Surface, SurfacePath, TextStyle};
use crate::color::Rgba;
use crate::font_manager;

/// Anti-aliased raster surface.
///
/// Strokes use butt caps and miter joins, matching an HTML canvas context
/// in its initial state.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Rgba,
}

impl PixmapSurface {
    /// New surface filled with white.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_background(width, height, Rgba::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Rgba) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::other(format!("Invalid surface size {}x{}", width, height))
        })?;
        let mut surface = Self { pixmap, background };
        surface.clear();
        Ok(surface)
    }

    /// Demultiplied colour of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.pixmap.width();
        let data = self.pixmap.data();
        RgbImage::from_fn(width, self.pixmap.height(), |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            Rgb([data[idx], data[idx + 1], data[idx + 2]])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| Error::other(format!("Failed to write {}: {}", path.display(), e)))
    }

    // Src-over blend of one coverage sample into the premultiplied buffer.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        let (width, height) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        if x < 0 || y < 0 || x >= width || y >= height {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }

        let idx = ((y * width + x) * 4) as usize;
        let pixel = &mut self.pixmap.data_mut()[idx..idx + 4];
        let src = [color.r, color.g, color.b];
        for (channel, value) in pixel.iter_mut().take(3).zip(src) {
            let blended = value as f32 * alpha + *channel as f32 * (1.0 - alpha);
            *channel = blended.round().clamp(0.0, 255.0) as u8;
        }
        let dst_a = pixel[3] as f32 / 255.0;
        pixel[3] = ((alpha + dst_a * (1.0 - alpha)) * 255.0).round() as u8;
    }
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn to_skia_path(path: &SurfacePath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for op in path.ops() {
        match *op {
            PathOp::MoveTo(x, y) => pb.move_to(x, y),
            PathOp::LineTo(x, y) => pb.line_to(x, y),
            PathOp::Circle { cx, cy, radius } => pb.push_circle(cx, cy, radius),
            PathOp::Close => pb.close(),
        }
    }
    pb.finish()
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        let bg = self.background;
        self.pixmap.fill(Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    }

    fn stroke_path(&mut self, path: &SurfacePath, style: &StrokeStyle) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: style.width,
            miter_limit: 10.0,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_path(&mut self, path: &SurfacePath, color: Rgba) {
        if let Some(path) = to_skia_path(path) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &StrokeStyle) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: style.width,
            miter_limit: 10.0,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let Some(font) = font_manager::get_font_for(&style.font) else {
            warn!("No system font available for '{}', skipping text", style.font.family);
            return;
        };

        let scale = Scale::uniform(style.font.size);
        for glyph in font.layout(text, scale, rt_point(x, y)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    self.blend_pixel(
                        gx as i32 + bb.min.x,
                        gy as i32 + bb.min.y,
                        style.color,
                        coverage,
                    );
                });
            }
        }
    }
}
