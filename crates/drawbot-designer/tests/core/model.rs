use drawbot_core::CommandError;
use drawbot_designer::{ShapeCommand, ShapeGeometry, ShapeKind};
use serde_json::{json, Value};

fn sample_of(kind: ShapeKind) -> Value {
    match kind {
        ShapeKind::Circle => json!({"shape": "circle", "x": 10, "y": 20, "radius": 5}),
        ShapeKind::Rect => json!({"shape": "rect", "x": 1, "y": 2, "width": 30, "height": 40}),
        ShapeKind::Line => json!({"shape": "line", "x1": 0, "y1": 0, "x2": 50, "y2": 60}),
        ShapeKind::Triangle => {
            json!({"shape": "triangle", "x1": 0, "y1": 0, "x2": 10, "y2": 0, "x3": 5, "y3": 8})
        }
        ShapeKind::Text => json!({"shape": "text", "x": 5, "y": 5, "text": "hello"}),
    }
}

#[test]
fn test_valid_sample_of_every_kind() {
    for kind in ShapeKind::ALL {
        let command = ShapeCommand::from_value(&sample_of(kind)).unwrap();
        assert_eq!(command.kind(), kind);
        assert!(command.validate().is_ok());
    }
}

#[test]
fn test_omitting_any_required_field_is_rejected() {
    for kind in ShapeKind::ALL {
        for field in kind.required_fields() {
            let mut raw = sample_of(kind);
            raw.as_object_mut().unwrap().remove(*field);
            let err = ShapeCommand::from_value(&raw).unwrap_err();
            assert_eq!(err, CommandError::missing_field(kind.as_str(), *field));
        }
    }
}

#[test]
fn test_null_counts_as_missing() {
    let raw = json!({"shape": "circle", "x": 1, "y": null, "radius": 4});
    assert_eq!(
        ShapeCommand::from_value(&raw).unwrap_err(),
        CommandError::missing_field("circle", "y")
    );
}

#[test]
fn test_missing_and_unknown_shape() {
    let err = ShapeCommand::from_value(&json!({"x": 1})).unwrap_err();
    assert_eq!(err, CommandError::MissingShape);
    assert_eq!(err.to_string(), "Missing 'shape' in command");

    let err = ShapeCommand::from_value(&json!({"shape": "hexagon"})).unwrap_err();
    assert_eq!(err.to_string(), "Unknown shape: hexagon");

    let err = ShapeCommand::from_value(&json!([1, 2])).unwrap_err();
    assert!(matches!(err, CommandError::NotAnObject { .. }));
}

#[test]
fn test_wrong_field_types_are_rejected() {
    let raw = json!({"shape": "rect", "x": "10", "y": 0, "width": 5, "height": 5});
    assert!(matches!(
        ShapeCommand::from_value(&raw),
        Err(CommandError::InvalidField { ref field, .. }) if field == "x"
    ));

    let raw = json!({"shape": "line", "x1": 0, "y1": 0, "x2": 1, "y2": 1, "lineWidth": "thick"});
    assert!(matches!(
        ShapeCommand::from_value(&raw),
        Err(CommandError::InvalidField { ref field, .. }) if field == "lineWidth"
    ));
}

#[test]
fn test_shape_invariants() {
    let zero_radius = json!({"shape": "circle", "x": 1, "y": 1, "radius": 0});
    assert_eq!(
        ShapeCommand::from_value(&zero_radius).unwrap_err().to_string(),
        "Invalid circle command: radius must be > 0"
    );

    let flat_rect = json!({"shape": "rect", "x": 1, "y": 1, "width": 10, "height": -2});
    assert!(ShapeCommand::from_value(&flat_rect).is_err());

    let blank_text = json!({"shape": "text", "x": 1, "y": 1, "text": "   "});
    assert!(ShapeCommand::from_value(&blank_text).is_err());

    let bad_width = json!({"shape": "circle", "x": 1, "y": 1, "radius": 3, "lineWidth": 0});
    assert!(ShapeCommand::from_value(&bad_width).is_err());
}

#[test]
fn test_degenerate_line_and_triangle_are_valid() {
    let point_line = json!({"shape": "line", "x1": 3, "y1": 3, "x2": 3, "y2": 3});
    assert!(ShapeCommand::from_value(&point_line).is_ok());

    let collinear =
        json!({"shape": "triangle", "x1": 0, "y1": 0, "x2": 5, "y2": 5, "x3": 10, "y3": 10});
    assert!(ShapeCommand::from_value(&collinear).is_ok());
}

#[test]
fn test_to_value_omits_unset_optionals() {
    let value = ShapeCommand::circle(1.0, 2.0, 3.0).to_value().unwrap();
    assert_eq!(
        value,
        json!({"shape": "circle", "x": 1.0, "y": 2.0, "radius": 3.0})
    );

    let value = ShapeCommand::rect(0.0, 0.0, 4.0, 5.0)
        .with_color("red")
        .with_line_width(2.5)
        .to_value()
        .unwrap();
    assert_eq!(value["color"], json!("red"));
    assert_eq!(value["lineWidth"], json!(2.5));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let raw = json!({"id": 7, "sequence": 0, "shape": "text", "x": 1, "y": 2, "text": "hi", "font": "bold 12px serif"});
    let command = ShapeCommand::from_value(&raw).unwrap();
    assert_eq!(command, ShapeCommand::text(1.0, 2.0, "hi").with_font("bold 12px serif"));
}

#[test]
fn test_extent_includes_size_attribute() {
    assert_eq!(ShapeCommand::circle(100.0, 50.0, 10.0).extent(), (110.0, 60.0));
    assert_eq!(ShapeCommand::rect(10.0, 20.0, 30.0, 40.0).extent(), (40.0, 60.0));
    assert_eq!(ShapeCommand::line(5.0, 90.0, 70.0, 1.0).extent(), (70.0, 90.0));
    assert_eq!(ShapeCommand::text(8.0, 9.0, "x").extent(), (8.0, 9.0));
}

#[test]
fn test_scaled_keeps_style() {
    let scaled = ShapeCommand::circle(100.0, 200.0, 30.0)
        .with_line_width(4.0)
        .scaled(0.5);
    assert_eq!(scaled, ShapeCommand::circle(50.0, 100.0, 15.0).with_line_width(4.0));
}
