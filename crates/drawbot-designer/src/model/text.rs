use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};

use super::{check_finite, ShapeGeometry, ShapeKind};

/// Filled text anchored at its alphabetic baseline start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCommand {
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// CSS font shorthand, e.g. `"bold 20px Arial"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextCommand {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font: None,
            color: None,
        }
    }
}

impl ShapeGeometry for TextCommand {
    fn validate(&self) -> Result<(), CommandError> {
        let kind = ShapeKind::Text;
        check_finite(kind, "x", self.x)?;
        check_finite(kind, "y", self.y)?;
        if self.text.trim().is_empty() {
            return Err(CommandError::invalid(kind.as_str(), "text must not be empty"));
        }
        Ok(())
    }

    // Glyph metrics are only known to the surface, so text is treated as its anchor point.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x, self.y)
    }

    fn extent(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            ..self.clone()
        }
    }
}
