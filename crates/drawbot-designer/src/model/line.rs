use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};

use super::{check_finite, check_line_width, ShapeGeometry, ShapeKind};

/// Straight segment. Coincident endpoints are valid and draw nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCommand {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl LineCommand {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            color: None,
            line_width: None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

impl ShapeGeometry for LineCommand {
    fn validate(&self) -> Result<(), CommandError> {
        let kind = ShapeKind::Line;
        check_finite(kind, "x1", self.x1)?;
        check_finite(kind, "y1", self.y1)?;
        check_finite(kind, "x2", self.x2)?;
        check_finite(kind, "y2", self.y2)?;
        check_line_width(kind, self.line_width)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    fn extent(&self) -> (f64, f64) {
        (self.x1.max(self.x2), self.y1.max(self.y2))
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x1: self.x1 * factor,
            y1: self.y1 * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
            ..self.clone()
        }
    }
}
