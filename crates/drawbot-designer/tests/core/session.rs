use drawbot_core::{DrawingId, OwnerId};
use drawbot_designer::{DrawOp, DrawingSession, RecordingSurface, Renderer, ShapeCommand};
use serde_json::json;

#[test]
fn test_instruction_batch_is_one_undo_step() {
    let mut session = DrawingSession::new(OwnerId::new(1));
    let result = session.apply_instruction_batch(
        "  a house ",
        &[
            json!({"shape": "rect", "x": 10, "y": 10, "width": 100, "height": 80}),
            json!({"shape": "triangle", "x1": 10, "y1": 10, "x2": 110, "y2": 10, "x3": 60, "y3": -30}),
            json!({"shape": "blob"}),
        ],
    );

    assert_eq!(result.commands.len(), 2);
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(session.commands().len(), 2);
    assert_eq!(session.instructions(), &["a house".to_string()]);
    assert_eq!(
        session.history().undo_description().as_deref(),
        Some("a house")
    );

    session.undo();
    assert!(session.commands().is_empty());
    // Undo keeps the instruction log.
    assert_eq!(session.instructions().len(), 1);
}

#[test]
fn test_instruction_with_no_valid_shapes_adds_no_history() {
    let mut session = DrawingSession::new(OwnerId::new(1));
    session.apply_instruction_batch("nothing useful", &[json!({"shape": "blob"})]);
    assert!(!session.history().can_undo());
    assert_eq!(session.instructions().len(), 1);
}

#[test]
fn test_load_drawing_resets_session() {
    let mut session = DrawingSession::new(OwnerId::new(3));
    session.apply_instruction_batch("a sun", &[json!({"shape": "circle", "x": 1, "y": 1, "radius": 4})]);

    let loaded = vec![
        ShapeCommand::rect(0.0, 0.0, 5.0, 5.0),
        ShapeCommand::text(1.0, 1.0, "hi"),
    ];
    session.load_drawing(DrawingId::new(42), "Saved", loaded.clone());

    assert_eq!(session.commands(), loaded.as_slice());
    assert_eq!(session.title(), "Saved");
    assert_eq!(session.source(), Some(DrawingId::new(42)));
    assert!(session.instructions().is_empty());
    assert!(!session.history().can_undo());
}

#[test]
fn test_session_render() {
    let mut session = DrawingSession::new(OwnerId::new(1));
    session.apply_batch(vec![ShapeCommand::line(0.0, 0.0, 10.0, 10.0)]);

    let mut surface = RecordingSurface::new(100, 100);
    let stats = session.render(&Renderer::default(), &mut surface);
    assert_eq!(stats.drawn, 1);
    assert!(matches!(surface.ops()[1], DrawOp::StrokePath { .. }));

    session.clear();
    session.render(&Renderer::default(), &mut surface);
    assert_eq!(surface.ops(), &[DrawOp::Clear]);
    assert_eq!(surface.clear_count(), 2);
}
