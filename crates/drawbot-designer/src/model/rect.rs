use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};

use super::{check_finite, check_line_width, ShapeGeometry, ShapeKind};

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectCommand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl RectCommand {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: None,
            line_width: None,
        }
    }
}

impl ShapeGeometry for RectCommand {
    fn validate(&self) -> Result<(), CommandError> {
        let kind = ShapeKind::Rect;
        check_finite(kind, "x", self.x)?;
        check_finite(kind, "y", self.y)?;
        check_finite(kind, "width", self.width)?;
        check_finite(kind, "height", self.height)?;
        if self.width <= 0.0 {
            return Err(CommandError::invalid(kind.as_str(), "width must be > 0"));
        }
        if self.height <= 0.0 {
            return Err(CommandError::invalid(kind.as_str(), "height must be > 0"));
        }
        check_line_width(kind, self.line_width)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn extent(&self) -> (f64, f64) {
        (self.x + self.width, self.y + self.height)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
            ..self.clone()
        }
    }
}
