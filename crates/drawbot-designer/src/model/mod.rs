use drawbot_core::CommandError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod circle;
mod line;
mod rect;
mod text;
mod triangle;

pub use circle::CircleCommand;
pub use line::LineCommand;
pub use rect::RectCommand;
pub use text::TextCommand;
pub use triangle::TriangleCommand;

/// Geometry shared by every shape command kind.
pub trait ShapeGeometry {
    /// Checks the kind's invariants. Pure, no side effects.
    fn validate(&self) -> Result<(), CommandError>;

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f64, f64, f64, f64);

    /// Bottom-right reach used by the fit-to-frame preview: the largest
    /// coordinate on each axis, expanded by the shape's size attribute.
    fn extent(&self) -> (f64, f64);

    /// Copy with every coordinate and size multiplied by `factor`.
    /// Line width and font are left untouched.
    fn scaled(&self, factor: f64) -> Self
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rect,
    Line,
    Triangle,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Rect,
        ShapeKind::Line,
        ShapeKind::Triangle,
        ShapeKind::Text,
    ];

    /// Wire tag carried in the `shape` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rect => "rect",
            ShapeKind::Line => "line",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Text => "text",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Fields a descriptor of this kind must carry, in wire spelling.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Circle => &["x", "y", "radius"],
            ShapeKind::Rect => &["x", "y", "width", "height"],
            ShapeKind::Line => &["x1", "y1", "x2", "y2"],
            ShapeKind::Triangle => &["x1", "y1", "x2", "y2", "x3", "y3"],
            ShapeKind::Text => &["x", "y", "text"],
        }
    }

    /// Optional style fields with their expected JSON type.
    fn optional_fields(&self) -> &'static [(&'static str, FieldType)] {
        match self {
            ShapeKind::Text => &[("font", FieldType::String), ("color", FieldType::String)],
            _ => &[("color", FieldType::String), ("lineWidth", FieldType::Number)],
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    Number,
    String,
}

/// One primitive drawing instruction.
///
/// Serialized as a flat object tagged by `shape`, with camelCase field
/// names. Optional style fields are omitted when unset; defaults are
/// resolved by the renderer, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ShapeCommand {
    Circle(CircleCommand),
    Rect(RectCommand),
    Line(LineCommand),
    Triangle(TriangleCommand),
    Text(TextCommand),
}

impl ShapeCommand {
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        ShapeCommand::Circle(CircleCommand::new(x, y, radius))
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        ShapeCommand::Rect(RectCommand::new(x, y, width, height))
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        ShapeCommand::Line(LineCommand::new(x1, y1, x2, y2))
    }

    pub fn triangle(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Self {
        ShapeCommand::Triangle(TriangleCommand::new(x1, y1, x2, y2, x3, y3))
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        ShapeCommand::Text(TextCommand::new(x, y, text))
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = Some(color.into());
        match &mut self {
            ShapeCommand::Circle(s) => s.color = color,
            ShapeCommand::Rect(s) => s.color = color,
            ShapeCommand::Line(s) => s.color = color,
            ShapeCommand::Triangle(s) => s.color = color,
            ShapeCommand::Text(s) => s.color = color,
        }
        self
    }

    /// Sets the stroke width. Text commands have no stroke and are returned unchanged.
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        let width = Some(line_width);
        match &mut self {
            ShapeCommand::Circle(s) => s.line_width = width,
            ShapeCommand::Rect(s) => s.line_width = width,
            ShapeCommand::Line(s) => s.line_width = width,
            ShapeCommand::Triangle(s) => s.line_width = width,
            ShapeCommand::Text(_) => {}
        }
        self
    }

    /// Sets the CSS-style font of a text command; other kinds are returned unchanged.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        if let ShapeCommand::Text(s) = &mut self {
            s.font = Some(font.into());
        }
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeCommand::Circle(_) => ShapeKind::Circle,
            ShapeCommand::Rect(_) => ShapeKind::Rect,
            ShapeCommand::Line(_) => ShapeKind::Line,
            ShapeCommand::Triangle(_) => ShapeKind::Triangle,
            ShapeCommand::Text(_) => ShapeKind::Text,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            ShapeCommand::Circle(s) => s.color.as_deref(),
            ShapeCommand::Rect(s) => s.color.as_deref(),
            ShapeCommand::Line(s) => s.color.as_deref(),
            ShapeCommand::Triangle(s) => s.color.as_deref(),
            ShapeCommand::Text(s) => s.color.as_deref(),
        }
    }

    pub fn line_width(&self) -> Option<f64> {
        match self {
            ShapeCommand::Circle(s) => s.line_width,
            ShapeCommand::Rect(s) => s.line_width,
            ShapeCommand::Line(s) => s.line_width,
            ShapeCommand::Triangle(s) => s.line_width,
            ShapeCommand::Text(_) => None,
        }
    }

    /// Parses a raw descriptor into a validated command.
    ///
    /// A `null` value counts as missing. Fields the model does not know
    /// (backend ids, ordering keys) are ignored.
    pub fn from_value(raw: &Value) -> Result<Self, CommandError> {
        let obj = raw.as_object().ok_or_else(|| CommandError::NotAnObject {
            found: json_type(raw).to_string(),
        })?;

        let tag = match obj.get("shape") {
            None | Some(Value::Null) => return Err(CommandError::MissingShape),
            Some(Value::String(tag)) => tag,
            Some(_) => {
                return Err(CommandError::InvalidField {
                    kind: "command".to_string(),
                    field: "shape".to_string(),
                    reason: "must be a string".to_string(),
                })
            }
        };

        let kind = ShapeKind::from_tag(tag).ok_or_else(|| CommandError::UnknownShape {
            shape: tag.clone(),
        })?;

        check_required_fields(kind, obj)?;
        check_optional_fields(kind, obj)?;

        let command: ShapeCommand =
            serde_json::from_value(raw.clone()).map_err(|e| CommandError::InvalidField {
                kind: kind.to_string(),
                field: "descriptor".to_string(),
                reason: e.to_string(),
            })?;

        command.validate()?;
        Ok(command)
    }

    /// Wire representation, with unset optional fields omitted.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl ShapeGeometry for ShapeCommand {
    fn validate(&self) -> Result<(), CommandError> {
        match self {
            ShapeCommand::Circle(s) => s.validate(),
            ShapeCommand::Rect(s) => s.validate(),
            ShapeCommand::Line(s) => s.validate(),
            ShapeCommand::Triangle(s) => s.validate(),
            ShapeCommand::Text(s) => s.validate(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            ShapeCommand::Circle(s) => s.bounds(),
            ShapeCommand::Rect(s) => s.bounds(),
            ShapeCommand::Line(s) => s.bounds(),
            ShapeCommand::Triangle(s) => s.bounds(),
            ShapeCommand::Text(s) => s.bounds(),
        }
    }

    fn extent(&self) -> (f64, f64) {
        match self {
            ShapeCommand::Circle(s) => s.extent(),
            ShapeCommand::Rect(s) => s.extent(),
            ShapeCommand::Line(s) => s.extent(),
            ShapeCommand::Triangle(s) => s.extent(),
            ShapeCommand::Text(s) => s.extent(),
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        match self {
            ShapeCommand::Circle(s) => ShapeCommand::Circle(s.scaled(factor)),
            ShapeCommand::Rect(s) => ShapeCommand::Rect(s.scaled(factor)),
            ShapeCommand::Line(s) => ShapeCommand::Line(s.scaled(factor)),
            ShapeCommand::Triangle(s) => ShapeCommand::Triangle(s.scaled(factor)),
            ShapeCommand::Text(s) => ShapeCommand::Text(s.scaled(factor)),
        }
    }
}

fn check_required_fields(kind: ShapeKind, obj: &Map<String, Value>) -> Result<(), CommandError> {
    for field in kind.required_fields() {
        let value = match obj.get(*field) {
            None | Some(Value::Null) => return Err(CommandError::missing_field(kind.as_str(), *field)),
            Some(value) => value,
        };
        let expected = if *field == "text" {
            FieldType::String
        } else {
            FieldType::Number
        };
        check_type(kind, field, value, expected)?;
    }
    Ok(())
}

fn check_optional_fields(kind: ShapeKind, obj: &Map<String, Value>) -> Result<(), CommandError> {
    for (field, expected) in kind.optional_fields() {
        match obj.get(*field) {
            None | Some(Value::Null) => {}
            Some(value) => check_type(kind, field, value, *expected)?,
        }
    }
    Ok(())
}

fn check_type(
    kind: ShapeKind,
    field: &str,
    value: &Value,
    expected: FieldType,
) -> Result<(), CommandError> {
    let ok = match expected {
        FieldType::Number => value.is_number(),
        FieldType::String => value.is_string(),
    };
    if ok {
        return Ok(());
    }
    Err(CommandError::InvalidField {
        kind: kind.to_string(),
        field: field.to_string(),
        reason: match expected {
            FieldType::Number => format!("must be a number, got {}", json_type(value)),
            FieldType::String => format!("must be a string, got {}", json_type(value)),
        },
    })
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn check_finite(kind: ShapeKind, field: &str, value: f64) -> Result<(), CommandError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CommandError::invalid(
            kind.as_str(),
            format!("{} must be a finite number", field),
        ))
    }
}

pub(crate) fn check_line_width(kind: ShapeKind, line_width: Option<f64>) -> Result<(), CommandError> {
    match line_width {
        Some(w) if !(w.is_finite() && w > 0.0) => Err(CommandError::invalid(
            kind.as_str(),
            "lineWidth must be > 0",
        )),
        _ => Ok(()),
    }
}
