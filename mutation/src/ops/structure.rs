//! Slot, root and derivative-link operations.

use warren_core::{NodeId, SlotTag};
use warren_graph::Graph;
use warren_mirror::{DerivativeCache, TemplateCatalog};
use warren_oplog::{Op, UserOp};

use crate::error::MutationResult;
use crate::ops::sync;

/// Set the occupant of a slot, log the compensation, and fan the change out
/// to every derivative of `parent`.
pub(crate) fn set_child(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    catalog: &dyn TemplateCatalog,
    ops: &mut UserOp,
    parent: NodeId,
    slot: SlotTag,
    child: Option<NodeId>,
) -> MutationResult<Option<NodeId>> {
    let prev = graph.set_child(parent, slot, child)?;
    if prev == child {
        return Ok(prev);
    }
    ops.push(Op::ChildSet { parent, slot, prev });
    sync::sync_slot(graph, cache, catalog, ops, parent, slot, child)?;
    Ok(prev)
}

/// Register a detached node as a root.
pub(crate) fn add_root(graph: &mut Graph, ops: &mut UserOp, id: NodeId) -> MutationResult<()> {
    graph.add_root(id)?;
    ops.push(Op::RootAdded { node: id });
    Ok(())
}

/// Unregister a root, logging the position it held.
pub(crate) fn remove_root(graph: &mut Graph, ops: &mut UserOp, id: NodeId) -> MutationResult<()> {
    let index = graph.remove_root(id)?;
    ops.push(Op::RootRemoved { node: id, index });
    Ok(())
}

/// Create a derivative link and index it in the cache.
pub(crate) fn link_derivative(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    ops: &mut UserOp,
    original: NodeId,
    derivative: NodeId,
) -> MutationResult<()> {
    graph.link_derivative(original, derivative)?;
    ops.push(Op::DerivativeLinked {
        original,
        derivative,
    });
    cache.put(graph, derivative);
    Ok(())
}

/// Sever a derivative link.
pub(crate) fn unlink_derivative(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    ops: &mut UserOp,
    original: NodeId,
    derivative: NodeId,
) -> MutationResult<()> {
    // Drop the cache entry while the link still resolves to its key.
    cache.remove(graph, derivative);
    graph.unlink_derivative(original, derivative)?;
    ops.push(Op::DerivativeUnlinked {
        original,
        derivative,
    });
    Ok(())
}
