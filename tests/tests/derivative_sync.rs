//! Derivative synchronization scenarios.

use warren_tests::prelude::*;

const ORIG: KindId = KindId(1);
const MIRROR: KindId = KindId(2);
const SLOT: SlotTag = SlotTag(1);
const OTHER_SLOT: SlotTag = SlotTag(2);

/// Original root with a child in SLOT plus a derivative mirroring both.
fn build_mirrored_pair(session: &Session) -> (NodeId, NodeId, NodeId, NodeId) {
    let ctx = session.begin(&[]).unwrap();
    let ids = session.mutate(&ctx, |m| {
        let original = m.create_node(ORIG, attrs!());
        let orig_child = m.create_node(ORIG, attrs!());
        m.add_root(original).unwrap();
        m.set_child(original, SLOT, Some(orig_child)).unwrap();
        let derivative = m.create_node(MIRROR, attrs!());
        let deriv_child = m.create_node(MIRROR, attrs!());
        m.add_root(derivative).unwrap();
        m.set_child(derivative, SLOT, Some(deriv_child)).unwrap();
        m.link_derivative(original, derivative).unwrap();
        m.link_derivative(orig_child, deriv_child).unwrap();
        (original, orig_child, derivative, deriv_child)
    });
    session.end(ctx).unwrap();
    ids
}

#[test]
fn test_replacement_propagates_through_a_two_level_chain() {
    // GIVEN - original <- d1 <- d2, templates registered for both hops
    let catalog = TestCatalog::new()
        .with(ORIG, SLOT, MIRROR)
        .with(MIRROR, SLOT, MIRROR);
    let session = session_with(catalog);
    let (original, _orig_child, d1, d1_child) = build_mirrored_pair(&session);
    let ctx = session.begin(&[]).unwrap();
    let (d2, d2_child) = session.mutate(&ctx, |m| {
        let d2 = m.create_node(MIRROR, attrs!());
        let d2_child = m.create_node(MIRROR, attrs!());
        m.add_root(d2).unwrap();
        m.set_child(d2, SLOT, Some(d2_child)).unwrap();
        m.link_derivative(d1, d2).unwrap();
        m.link_derivative(d1_child, d2_child).unwrap();
        (d2, d2_child)
    });
    session.end(ctx).unwrap();

    // WHEN - the top original's slot is replaced
    let ctx = session.begin(&[]).unwrap();
    let replacement = session.mutate(&ctx, |m| {
        let replacement = m.create_node(ORIG, attrs!());
        m.set_child(original, SLOT, Some(replacement)).unwrap();
        replacement
    });
    session.end(ctx).unwrap();

    // THEN - both chain levels hold fresh nodes linked down the chain, and
    // the displaced occupants were purged at commit
    session.read(|g| {
        let s1 = g.child_at(d1, SLOT).unwrap();
        let s2 = g.child_at(d2, SLOT).unwrap();
        assert_eq!(g.original_of(s1), Some(replacement));
        assert_eq!(g.original_of(s2), Some(s1));
        assert!(!g.contains(d1_child));
        assert!(!g.contains(d2_child));
    });
}

#[test]
fn test_removal_without_template_spares_unrelated_slots() {
    // GIVEN - no templates, and an unrelated occupant in the derivative
    let session = session_with(TestCatalog::new());
    let (original, _orig_child, derivative, deriv_child) = build_mirrored_pair(&session);
    let ctx = session.begin(&[]).unwrap();
    let unrelated = session.mutate(&ctx, |m| {
        let unrelated = m.create_node(MIRROR, attrs!());
        m.set_child(derivative, OTHER_SLOT, Some(unrelated)).unwrap();
        unrelated
    });
    session.end(ctx).unwrap();

    // WHEN - the original's mirrored slot is replaced with a template-less
    // kind
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let other = m.create_node(ORIG, attrs!());
        m.set_child(original, SLOT, Some(other)).unwrap();
    });
    session.end(ctx).unwrap();

    // THEN - mirrored slot emptied and its occupant purged; the unrelated
    // slot is untouched
    session.read(|g| {
        assert_eq!(g.child_at(derivative, SLOT), None);
        assert!(!g.contains(deriv_child));
        assert_eq!(g.child_at(derivative, OTHER_SLOT), Some(unrelated));
    });
}

#[test]
fn test_sync_and_purge_are_fully_undoable() {
    // GIVEN - a committed replacement that resynced a derivative
    let catalog = TestCatalog::new().with(ORIG, SLOT, MIRROR);
    let session = session_with(catalog);
    let (original, _orig_child, _derivative, _deriv_child) = build_mirrored_pair(&session);
    let before = session.read(snapshot);
    let ctx = session.begin(&[]).unwrap();
    session.mutate(&ctx, |m| {
        let replacement = m.create_node(ORIG, attrs!());
        m.set_child(original, SLOT, Some(replacement)).unwrap();
    });
    session.end(ctx).unwrap();
    assert_ne!(session.read(snapshot), before);

    // WHEN
    session.undo().unwrap();

    // THEN - the derivative's old occupant is back, links restored
    assert_eq!(session.read(snapshot), before);
}

#[test]
fn test_reattachment_cancels_delayed_deletion() {
    // GIVEN - a node deleted and reattached inside one transaction
    let session = session_with(TestCatalog::new());
    let ctx = session.begin(&[]).unwrap();
    let (root, node) = session.mutate(&ctx, |m| {
        let root = m.create_node(ORIG, attrs!());
        let node = m.create_node(ORIG, attrs!());
        m.add_root(root).unwrap();
        m.set_child(root, SLOT, Some(node)).unwrap();
        m.delete_node(node).unwrap();
        m.set_child(root, SLOT, Some(node)).unwrap();
        (root, node)
    });
    session.end(ctx).unwrap();

    // THEN - the commit purge spared it
    session.read(|g| {
        assert!(g.contains(node));
        assert_eq!(g.child_at(root, SLOT), Some(node));
    });
}
