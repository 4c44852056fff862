use drawbot_designer::{canonicalize, canonicalize_batch, normalize, ShapeCommand};
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_legacy_circle_becomes_canonical() {
    let raw = json!({"action": "draw_circle", "position": [120, 80], "color": "orange"});
    let command = canonicalize(&raw).unwrap();
    assert_eq!(
        command,
        ShapeCommand::circle(120.0, 80.0, 30.0).with_color("orange")
    );
}

#[test]
fn test_legacy_line_becomes_canonical() {
    let raw = json!({"action": "draw_line", "start": [0, 10], "end": [100, 10]});
    assert_eq!(
        canonicalize(&raw).unwrap(),
        ShapeCommand::line(0.0, 10.0, 100.0, 10.0)
    );
}

#[test]
fn test_batch_drops_invalid_descriptors_in_place() {
    let raws = vec![
        json!({"shape": "rect", "x": 10, "y": 10, "width": 100, "height": 80}),
        json!({"shape": "hexagon"}),
        json!({"action": "draw_circle", "position": [5, 5], "radius": 2}),
        json!({"shape": "circle", "x": 1}),
        json!("garbage"),
    ];

    let result = canonicalize_batch(&raws);
    assert_eq!(
        result.commands,
        vec![
            ShapeCommand::rect(10.0, 10.0, 100.0, 80.0),
            ShapeCommand::circle(5.0, 5.0, 2.0),
        ]
    );
    let rejected: Vec<usize> = result.rejected.iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![1, 3, 4]);
}

#[test]
fn test_empty_batch() {
    let result = canonicalize_batch(&[]);
    assert!(result.commands.is_empty());
    assert!(result.rejected.is_empty());
}

fn coordinate() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1000i64..1000).prop_map(Value::from),
        (-1000.0f64..1000.0).prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn descriptor() -> impl Strategy<Value = Value> {
    prop_oneof![
        (coordinate(), coordinate(), prop::option::of(coordinate())).prop_map(|(x, y, r)| {
            let mut v = json!({"action": "draw_circle", "position": [x, y]});
            if let Some(r) = r {
                v["radius"] = r;
            }
            v
        }),
        (coordinate(), coordinate(), coordinate(), coordinate()).prop_map(|(a, b, c, d)| {
            json!({"action": "draw_line", "start": [a, b], "end": [c, d], "lineWidth": 2})
        }),
        (coordinate(), coordinate(), coordinate())
            .prop_map(|(x, y, r)| json!({"shape": "circle", "x": x, "y": y, "radius": r})),
        (coordinate(), coordinate())
            .prop_map(|(x, y)| json!({"action": "draw_circle", "center": [x, y]})),
        Just(json!(42)),
    ]
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in descriptor()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_canonical_commands_survive_normalization(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        r in 0.5f64..200.0,
    ) {
        let command = ShapeCommand::circle(x, y, r);
        let value = command.to_value().unwrap();
        prop_assert_eq!(canonicalize(&value).unwrap(), command);
    }
}
