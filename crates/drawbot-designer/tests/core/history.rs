use drawbot_designer::{EditBatch, EditHistory, HistoryEntry, ShapeCommand};
use proptest::prelude::*;

fn shapes(tag: f64, n: usize) -> Vec<ShapeCommand> {
    (0..n)
        .map(|i| ShapeCommand::circle(tag, i as f64, 1.0 + i as f64))
        .collect()
}

// Baseline followed by every live batch on the undo stack.
fn replay(history: &EditHistory) -> Vec<ShapeCommand> {
    let mut out = history.baseline().to_vec();
    for entry in history.undo_entries() {
        if let HistoryEntry::Batch(batch) = entry {
            out.extend(batch.commands.iter().cloned());
        }
    }
    out
}

#[test]
fn test_rect_then_circle_undo_redo() {
    let rect = ShapeCommand::rect(10.0, 10.0, 100.0, 80.0).with_color("red");
    let circle = ShapeCommand::circle(200.0, 200.0, 30.0).with_color("yellow");

    let mut history = EditHistory::new();
    history.apply_batch(vec![rect.clone()]);
    history.apply_batch(vec![circle.clone()]);
    assert_eq!(history.commands().len(), 2);

    assert!(history.undo());
    assert_eq!(history.commands(), &[rect.clone()]);

    assert!(history.redo());
    assert_eq!(history.commands(), &[rect, circle]);
}

#[test]
fn test_new_batch_discards_redo() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(1.0, 2));
    history.undo();
    assert!(history.can_redo());

    history.apply_batch(shapes(2.0, 1));
    assert!(!history.can_redo());
    assert_eq!(history.commands(), shapes(2.0, 1).as_slice());
}

#[test]
fn test_undo_removes_exactly_one_batch() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(1.0, 3));
    history.apply_batch(shapes(2.0, 2));

    history.undo();
    assert_eq!(history.commands(), shapes(1.0, 3).as_slice());
    assert_eq!(history.undo_depth(), 1);
    assert_eq!(history.redo_depth(), 1);
}

#[test]
fn test_redo_restores_most_recently_undone_first() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(1.0, 1));
    history.apply_batch(shapes(2.0, 1));
    history.apply_batch(shapes(3.0, 1));

    history.undo();
    history.undo();
    let next: Vec<_> = history.redo_entries().collect();
    assert_eq!(next[0], &HistoryEntry::Batch(EditBatch::new(shapes(2.0, 1))));

    history.redo();
    let mut expected = shapes(1.0, 1);
    expected.extend(shapes(2.0, 1));
    assert_eq!(history.commands(), expected.as_slice());
}

#[test]
fn test_clear_is_one_undoable_step() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(1.0, 2));
    history.apply_batch(shapes(2.0, 3));
    let before = history.commands().to_vec();

    assert!(history.clear());
    assert!(history.commands().is_empty());
    assert_eq!(history.undo_depth(), 1);
    assert!(!history.can_redo());

    assert!(history.undo());
    assert_eq!(history.commands(), before.as_slice());
    // Original batch boundaries are back.
    assert_eq!(history.undo_depth(), 2);
    history.undo();
    assert_eq!(history.commands(), shapes(1.0, 2).as_slice());
}

#[test]
fn test_redo_of_clear_empties_again() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(1.0, 2));
    history.clear();
    history.apply_batch(shapes(9.0, 1));

    history.undo();
    history.undo();
    assert_eq!(history.commands(), shapes(1.0, 2).as_slice());

    history.redo();
    assert!(history.commands().is_empty());
    history.redo();
    assert_eq!(history.commands(), shapes(9.0, 1).as_slice());
    assert!(!history.can_redo());
}

#[test]
fn test_loaded_drawing_is_not_undoable() {
    let mut history = EditHistory::new();
    history.apply_batch(shapes(5.0, 1));
    history.reset(shapes(1.0, 4));
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    history.apply_batch(shapes(2.0, 1));
    history.undo();
    assert!(!history.undo());
    assert_eq!(history.commands(), shapes(1.0, 4).as_slice());

    // Clearing a loaded drawing is still undoable.
    history.clear();
    history.undo();
    assert_eq!(history.commands(), shapes(1.0, 4).as_slice());
}

#[derive(Debug, Clone)]
enum Op {
    Apply(usize),
    Undo,
    Redo,
    Clear,
    Reset(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..4).prop_map(Op::Apply),
        3 => Just(Op::Undo),
        3 => Just(Op::Redo),
        1 => Just(Op::Clear),
        1 => (0usize..3).prop_map(Op::Reset),
    ]
}

proptest! {
    #[test]
    fn prop_sequence_matches_live_batches(ops in prop::collection::vec(op(), 0..40), depth in prop::option::of(1usize..6)) {
        let mut history = match depth {
            Some(d) => EditHistory::with_max_depth(d),
            None => EditHistory::new(),
        };
        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Apply(n) => { history.apply_batch(shapes(step as f64, n)); }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
                Op::Clear => { history.clear(); }
                Op::Reset(n) => history.reset(shapes(-(step as f64), n)),
            }
            prop_assert_eq!(replay(&history), history.commands().to_vec());
            if let Some(d) = depth {
                prop_assert!(history.undo_depth() <= d);
            }
        }
    }

    #[test]
    fn prop_n_undos_then_n_redos_round_trip(sizes in prop::collection::vec(1usize..4, 1..12)) {
        let mut history = EditHistory::new();
        for (i, n) in sizes.iter().enumerate() {
            history.apply_batch(shapes(i as f64, *n));
        }
        let original = history.commands().to_vec();

        for _ in 0..sizes.len() {
            prop_assert!(history.undo());
        }
        prop_assert!(history.commands().is_empty());
        for _ in 0..sizes.len() {
            prop_assert!(history.redo());
        }
        prop_assert_eq!(history.commands(), original.as_slice());
    }
}
