use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};

use super::{check_finite, check_line_width, ShapeGeometry, ShapeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleCommand {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl CircleCommand {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            color: None,
            line_width: None,
        }
    }
}

impl ShapeGeometry for CircleCommand {
    fn validate(&self) -> Result<(), CommandError> {
        let kind = ShapeKind::Circle;
        check_finite(kind, "x", self.x)?;
        check_finite(kind, "y", self.y)?;
        check_finite(kind, "radius", self.radius)?;
        if self.radius <= 0.0 {
            return Err(CommandError::invalid(kind.as_str(), "radius must be > 0"));
        }
        check_line_width(kind, self.line_width)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x - self.radius,
            self.y - self.radius,
            self.x + self.radius,
            self.y + self.radius,
        )
    }

    fn extent(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            radius: self.radius * factor,
            ..self.clone()
        }
    }
}
