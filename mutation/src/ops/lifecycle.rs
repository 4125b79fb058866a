//! Node creation, recursive deletion and the commit-time purge.

use tracing::debug;
use warren_core::{Attributes, KindId, NodeId, SlotTag};
use warren_graph::{Graph, GraphError};
use warren_mirror::{DerivativeCache, TemplateCatalog};
use warren_oplog::{Op, UserOp};

use crate::error::MutationResult;
use crate::ops::sync;
use crate::result::PurgeOutcome;

/// Create a new detached node and log its creation.
pub(crate) fn create_node(
    graph: &mut Graph,
    ops: &mut UserOp,
    kind: KindId,
    attributes: Attributes,
) -> NodeId {
    let id = graph.create_node(kind, attributes);
    ops.push(Op::NodeCreated { node: id });
    id
}

/// Delete a node: detach it from its holder (fanning the removal out to the
/// holder's derivatives), recursively delete every node mirroring it, and
/// schedule the whole subtree for purge at commit.
pub(crate) fn delete_node(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    catalog: &dyn TemplateCatalog,
    ops: &mut UserOp,
    id: NodeId,
) -> MutationResult<()> {
    if !graph.contains(id) {
        return Err(GraphError::NodeNotFound(id).into());
    }
    if graph.is_delayed(id) {
        return Ok(());
    }
    if let Some(link) = graph.node(id).and_then(|n| n.parent()) {
        graph.set_child(link.parent, link.slot, None)?;
        ops.push(Op::ChildSet {
            parent: link.parent,
            slot: link.slot,
            prev: Some(id),
        });
        sync::sync_slot(graph, cache, catalog, ops, link.parent, link.slot, None)?;
    } else if graph.is_root(id) {
        let index = graph.remove_root(id)?;
        ops.push(Op::RootRemoved { node: id, index });
    }
    schedule(graph, cache, catalog, ops, id)
}

/// Schedule a detached subtree for purge: delete dependent derivatives,
/// sever original links, and mark every member delayed. Edges inside the
/// subtree stay intact until the purge so reattachment can cancel it whole.
fn schedule(
    graph: &mut Graph,
    cache: &mut DerivativeCache,
    catalog: &dyn TemplateCatalog,
    ops: &mut UserOp,
    id: NodeId,
) -> MutationResult<()> {
    for derivative in graph.derivatives_of(id).to_vec() {
        delete_node(graph, cache, catalog, ops, derivative)?;
    }
    if let Some(original) = graph.original_of(id) {
        cache.remove(graph, id);
        graph.unlink_derivative(original, id)?;
        ops.push(Op::DerivativeUnlinked {
            original,
            derivative: id,
        });
    }
    graph.mark_delayed(id)?;
    let children: Vec<NodeId> = graph
        .node(id)
        .map(|n| n.children().map(|(_, c)| c).collect())
        .unwrap_or_default();
    for child in children {
        schedule(graph, cache, catalog, ops, child)?;
    }
    Ok(())
}

/// Remove every node still scheduled for deletion from the arena.
///
/// Nodes that found their way back under a root since being scheduled are
/// skipped. Only subtree tops (parentless members) drive the removal;
/// attached members leave with their holder.
pub(crate) fn purge_delayed(graph: &mut Graph, ops: &mut UserOp) -> MutationResult<PurgeOutcome> {
    let delayed = graph.take_delayed();
    let mut outcome = PurgeOutcome::default();
    for id in delayed {
        if !graph.contains(id) || graph.is_root_reachable(id) {
            continue;
        }
        if graph.node(id).and_then(|n| n.parent()).is_some() {
            continue;
        }
        purge_tree(graph, ops, id, &mut outcome)?;
    }
    if outcome.purged > 0 {
        debug!(purged = outcome.purged, "delayed deletions purged");
    }
    Ok(outcome)
}

/// Tear one subtree out of the arena, compensations included: detach each
/// child, recurse, sever remaining derivative links, then remove the node.
fn purge_tree(
    graph: &mut Graph,
    ops: &mut UserOp,
    id: NodeId,
    outcome: &mut PurgeOutcome,
) -> MutationResult<()> {
    let children: Vec<(SlotTag, NodeId)> = graph
        .node(id)
        .map(|n| n.children().collect())
        .unwrap_or_default();
    for (slot, child) in children {
        graph.set_child(id, slot, None)?;
        ops.push(Op::ChildSet {
            parent: id,
            slot,
            prev: Some(child),
        });
        purge_tree(graph, ops, child, outcome)?;
    }
    for derivative in graph.derivatives_of(id).to_vec() {
        graph.unlink_derivative(id, derivative)?;
        ops.push(Op::DerivativeUnlinked {
            original: id,
            derivative,
        });
    }
    if let Some(original) = graph.original_of(id) {
        graph.unlink_derivative(original, id)?;
        ops.push(Op::DerivativeUnlinked {
            original,
            derivative: id,
        });
    }
    let data = graph.remove_node(id)?;
    if data.is_invalid() {
        outcome.invalid.push(id);
    }
    ops.push(Op::NodeRemoved {
        node: Box::new(data),
    });
    outcome.purged += 1;
    Ok(())
}
