//! Undo/redo scenarios over full commit pipelines.

use warren_tests::prelude::*;

const KIND: KindId = KindId(1);
const SLOT_A: SlotTag = SlotTag(1);
const SLOT_B: SlotTag = SlotTag(2);

#[test]
fn test_undo_restores_the_exact_prior_graph() {
    // GIVEN - a committed document with structure, attributes and a
    // derivative link
    let session = session_with(TestCatalog::new());
    let ctx = session.begin(&[]).unwrap();
    let (root, child, mirror) = session.mutate(&ctx, |m| {
        let root = m.create_node(KIND, attrs! { "text" => "if" });
        let child = m.create_node(KIND, attrs! { "text" => "cond" });
        let mirror = m.create_node(KIND, attrs!());
        m.add_root(root).unwrap();
        m.set_child(root, SLOT_A, Some(child)).unwrap();
        m.add_root(mirror).unwrap();
        m.link_derivative(root, mirror).unwrap();
        (root, child, mirror)
    });
    session.end(ctx).unwrap();
    let before = session.read(snapshot);

    // WHEN - a second edit rewires everything, commits, and is undone
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        m.set_attr(root, "text", Some(Value::from("while")))
            .unwrap();
        m.set_child(root, SLOT_A, None).unwrap();
        m.set_child(root, SLOT_B, Some(child)).unwrap();
        m.unlink_derivative(root, mirror).unwrap();
        m.delete_node(mirror).unwrap();
        m.set_selected(child, true).unwrap();
    });
    session.end(ctx).unwrap();
    assert_ne!(session.read(snapshot), before);
    assert!(session.undo().unwrap());

    // THEN - every observable detail is back
    assert_eq!(session.read(snapshot), before);
}

#[test]
fn test_redo_reapplies_the_undone_edit() {
    // GIVEN - two committed edits, the second undone
    let session = session_with(TestCatalog::new());
    let ctx = session.begin(&[]).unwrap();
    let root = session.mutate(&ctx, |m| {
        let root = m.create_node(KIND, attrs!());
        m.add_root(root).unwrap();
        root
    });
    session.end(ctx).unwrap();
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        m.set_attr(root, "text", Some(Value::from("x"))).unwrap();
    });
    session.end(ctx).unwrap();
    let after = session.read(snapshot);
    assert!(session.undo().unwrap());

    // WHEN
    assert!(session.redo().unwrap());

    // THEN
    assert_eq!(session.read(snapshot), after);
    assert_eq!(session.redo_count(), 0);
    assert_eq!(session.undo_count(), 2);
}

#[test]
fn test_transaction_with_no_effect_stacks_nothing() {
    // GIVEN
    let session = session_with(TestCatalog::new());

    // WHEN - a begin/end pair that never mutates
    let ctx = session.begin(&[]).unwrap();
    session.end(ctx).unwrap();

    // THEN
    assert_eq!(session.undo_count(), 0);
    assert!(!session.undo().unwrap());
}

#[test]
fn test_undo_stack_evicts_oldest_beyond_limit() {
    // GIVEN - capacity 2
    let session = Session::new(
        Box::new(TestCatalog::new()),
        Box::new(BrokenAttrPolicy),
        SessionConfig { undo_limit: 2 },
    );
    let ctx = session.begin(&[]).unwrap();
    let root = session.mutate(&ctx, |m| {
        let root = m.create_node(KIND, attrs!());
        m.add_root(root).unwrap();
        root
    });
    session.end(ctx).unwrap();

    // WHEN - two more edits overflow the stack
    for value in [1i64, 2] {
        let ctx = session.begin(&[]).unwrap();
        session.mutate(&ctx, |m| {
            m.set_attr(root, "n", Some(Value::Int(value))).unwrap();
        });
        session.end(ctx).unwrap();
    }

    // THEN - only the two newest edits unwind; the root itself survives
    assert_eq!(session.undo_count(), 2);
    assert!(session.undo().unwrap());
    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap());
    assert!(session.read(|g| g.is_root(root)));
}

#[test]
fn test_new_commit_invalidates_redo() {
    // GIVEN - an edit undone onto the redo stack
    let session = session_with(TestCatalog::new());
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let root = m.create_node(KIND, attrs!());
        m.add_root(root).unwrap();
    });
    session.end(ctx).unwrap();
    session.undo().unwrap();
    assert_eq!(session.redo_count(), 1);

    // WHEN - a fresh edit commits
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let other = m.create_node(KIND, attrs!());
        m.add_root(other).unwrap();
    });
    session.end(ctx).unwrap();

    // THEN
    assert_eq!(session.redo_count(), 0);
    assert!(!session.redo().unwrap());
}
