//! Render pipeline.
//!
//! Every render is a full repaint: the surface is cleared and the whole
//! command sequence is drawn in order, later commands over earlier ones.
//! Style defaults are resolved here and never written back to commands.

mod pixmap;
mod recording;
mod surface;

pub use pixmap::PixmapSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{PathOp, StrokeStyle, Surface, SurfacePath, TextStyle};

use serde_json::Value;
use tracing::{debug, warn};

use crate::color::Rgba;
use crate::font_manager::{FontSpec, DEFAULT_FONT};
use crate::model::{ShapeCommand, ShapeGeometry};
use crate::normalize::canonicalize;

/// Font used by the preview when a text command carries none.
pub const PREVIEW_FONT: &str = "16px Arial";

/// Defaults applied to commands that leave a style field unset.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub default_color: Rgba,
    pub default_line_width: f32,
    /// CSS font shorthand.
    pub default_font: String,
}

impl RenderOptions {
    /// Defaults of the preview frame: thicker strokes, smaller text.
    pub fn preview() -> Self {
        Self {
            default_line_width: 2.0,
            default_font: PREVIEW_FONT.to_string(),
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_color: Rgba::BLACK,
            default_line_width: 1.0,
            default_font: DEFAULT_FONT.to_string(),
        }
    }
}

/// Outcome of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Uniform scale that fits `commands` into a `frame_w` x `frame_h` frame.
///
/// The reach of the drawing on each axis is the largest coordinate of any
/// command plus its size attribute (rect width/height, circle radius).
/// An axis whose reach is zero or negative does not constrain the scale.
/// The result is never larger than 1, so small drawings are not magnified.
pub fn preview_scale(commands: &[ShapeCommand], frame_w: f64, frame_h: f64) -> f64 {
    let (max_x, max_y) = commands
        .iter()
        .filter(|c| c.validate().is_ok())
        .map(|c| c.extent())
        .fold((f64::NEG_INFINITY, f64::NEG_INFINITY), |(mx, my), (x, y)| {
            (mx.max(x), my.max(y))
        });

    // Finite coordinates can still sum past f64::MAX.
    let axis = |frame: f64, reach: f64| {
        if reach > 0.0 && frame > 0.0 {
            frame / reach.min(f64::MAX)
        } else {
            1.0
        }
    };

    axis(frame_w, max_x)
        .min(axis(frame_h, max_y))
        .clamp(f64::MIN_POSITIVE, 1.0)
}

/// Draws shape commands onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    preview: RenderOptions,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            preview: RenderOptions::preview(),
        }
    }

    pub fn with_preview_options(mut self, preview: RenderOptions) -> Self {
        self.preview = preview;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn preview_options(&self) -> &RenderOptions {
        &self.preview
    }

    /// Clears `surface` and draws `commands` in order.
    ///
    /// A command failing validation is skipped; the rest still render.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        commands: &[ShapeCommand],
    ) -> RenderStats {
        surface.clear();
        let mut stats = RenderStats::default();
        for (index, command) in commands.iter().enumerate() {
            match command.validate() {
                Ok(()) => {
                    draw_command(surface, command, &self.options);
                    stats.drawn += 1;
                }
                Err(e) => {
                    warn!("Skipping command #{}: {}", index, e);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }

    /// Like [`Renderer::render`], normalizing each raw descriptor first.
    pub fn render_raw<S: Surface + ?Sized>(&self, surface: &mut S, raws: &[Value]) -> RenderStats {
        surface.clear();
        let mut stats = RenderStats::default();
        for (index, raw) in raws.iter().enumerate() {
            match canonicalize(raw) {
                Ok(command) => {
                    draw_command(surface, &command, &self.options);
                    stats.drawn += 1;
                }
                Err(e) => {
                    warn!("Skipping descriptor #{}: {} ({})", index, e, raw);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }

    /// Fit-to-frame render: every coordinate and size is multiplied by
    /// [`preview_scale`] for the surface size, and the preview defaults apply.
    pub fn render_preview<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        commands: &[ShapeCommand],
    ) -> RenderStats {
        let (w, h) = surface.size();
        let scale = preview_scale(commands, w as f64, h as f64);
        debug!("Preview scale {:.4} for {}x{} frame", scale, w, h);

        let scaled: Vec<ShapeCommand> = commands.iter().map(|c| c.scaled(scale)).collect();
        Renderer::new(self.preview.clone()).render(surface, &scaled)
    }
}

fn resolve_color(color: Option<&str>, default: Rgba) -> Rgba {
    match color {
        None => default,
        Some(css) => Rgba::from_css(css).unwrap_or_else(|| {
            debug!("Unrecognized color '{}', using default", css);
            default
        }),
    }
}

fn resolve_font(font: Option<&str>, default: &str) -> FontSpec {
    font.and_then(FontSpec::parse)
        .or_else(|| FontSpec::parse(default))
        .unwrap_or_default()
}

fn stroke_style(command: &ShapeCommand, options: &RenderOptions) -> StrokeStyle {
    StrokeStyle {
        color: resolve_color(command.color(), options.default_color),
        width: command
            .line_width()
            .map(|w| w as f32)
            .unwrap_or(options.default_line_width),
    }
}

fn draw_command<S: Surface + ?Sized>(
    surface: &mut S,
    command: &ShapeCommand,
    options: &RenderOptions,
) {
    match command {
        ShapeCommand::Circle(c) => {
            let mut path = SurfacePath::new();
            path.circle(c.x as f32, c.y as f32, c.radius as f32);
            surface.stroke_path(&path, &stroke_style(command, options));
        }
        ShapeCommand::Rect(r) => {
            surface.stroke_rect(
                r.x as f32,
                r.y as f32,
                r.width as f32,
                r.height as f32,
                &stroke_style(command, options),
            );
        }
        ShapeCommand::Line(l) => {
            if l.is_degenerate() {
                debug!("Line ({}, {}) has coincident endpoints", l.x1, l.y1);
            }
            let mut path = SurfacePath::new();
            path.move_to(l.x1 as f32, l.y1 as f32)
                .line_to(l.x2 as f32, l.y2 as f32);
            surface.stroke_path(&path, &stroke_style(command, options));
        }
        ShapeCommand::Triangle(t) => {
            if t.is_degenerate() {
                debug!("Triangle points are collinear, outline will be flat");
            }
            let mut path = SurfacePath::new();
            path.move_to(t.x1 as f32, t.y1 as f32)
                .line_to(t.x2 as f32, t.y2 as f32)
                .line_to(t.x3 as f32, t.y3 as f32)
                .close();
            surface.stroke_path(&path, &stroke_style(command, options));
        }
        ShapeCommand::Text(t) => {
            let style = TextStyle {
                color: resolve_color(t.color.as_deref(), options.default_color),
                font: resolve_font(t.font.as_deref(), &options.default_font),
            };
            surface.fill_text(&t.text, t.x as f32, t.y as f32, &style);
        }
    }
}
