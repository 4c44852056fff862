use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};

use super::{check_finite, check_line_width, ShapeGeometry, ShapeKind};

/// Closed three-point outline.
///
/// Collinear points are accepted; they stroke as a flat sliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleCommand {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub x3: f64,
    pub y3: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl TriangleCommand {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
            color: None,
            line_width: None,
        }
    }

    pub fn points(&self) -> [(f64, f64); 3] {
        [(self.x1, self.y1), (self.x2, self.y2), (self.x3, self.y3)]
    }

    /// Twice the signed area; zero when the points are collinear.
    pub fn signed_area2(&self) -> f64 {
        (self.x2 - self.x1) * (self.y3 - self.y1) - (self.x3 - self.x1) * (self.y2 - self.y1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.signed_area2().abs() < 1e-9
    }
}

impl ShapeGeometry for TriangleCommand {
    fn validate(&self) -> Result<(), CommandError> {
        let kind = ShapeKind::Triangle;
        for (field, value) in [
            ("x1", self.x1),
            ("y1", self.y1),
            ("x2", self.x2),
            ("y2", self.y2),
            ("x3", self.x3),
            ("y3", self.y3),
        ] {
            check_finite(kind, field, value)?;
        }
        check_line_width(kind, self.line_width)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let [a, b, c] = self.points();
        (
            a.0.min(b.0).min(c.0),
            a.1.min(b.1).min(c.1),
            a.0.max(b.0).max(c.0),
            a.1.max(b.1).max(c.1),
        )
    }

    fn extent(&self) -> (f64, f64) {
        let (_, _, max_x, max_y) = self.bounds();
        (max_x, max_y)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x1: self.x1 * factor,
            y1: self.y1 * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
            x3: self.x3 * factor,
            y3: self.y3 * factor,
            ..self.clone()
        }
    }
}
