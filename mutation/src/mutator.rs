//! Mutator - coordinates logged mutation operations.

use warren_core::{Attributes, KindId, NodeId, SlotTag, Value};
use warren_graph::Graph;
use warren_mirror::{DerivativeCache, TemplateCatalog};
use warren_oplog::UserOp;

use crate::error::MutationResult;
use crate::ops;
use crate::result::PurgeOutcome;

/// Logged mutation access to one document, scoped to one transaction.
///
/// Borrows the document's graph, derivative cache and active composite for
/// the duration of a `mutate` closure; every primitive pushes its
/// compensation before returning, so the composite always undoes exactly
/// what has run so far.
pub struct Mutator<'a> {
    graph: &'a mut Graph,
    cache: &'a mut DerivativeCache,
    catalog: &'a dyn TemplateCatalog,
    ops: &'a mut UserOp,
}

impl<'a> Mutator<'a> {
    /// Create a new mutator over the given transaction state.
    pub fn new(
        graph: &'a mut Graph,
        cache: &'a mut DerivativeCache,
        catalog: &'a dyn TemplateCatalog,
        ops: &'a mut UserOp,
    ) -> Self {
        Self {
            graph,
            cache,
            catalog,
            ops,
        }
    }

    /// Read access to the graph mid-mutation.
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Create a new detached node.
    pub fn create_node(&mut self, kind: KindId, attributes: Attributes) -> NodeId {
        ops::create_node(self.graph, self.ops, kind, attributes)
    }

    /// Delete a node and everything that depends on it: detaches it,
    /// recursively deletes its derivatives, and marks the subtree for purge
    /// at commit.
    pub fn delete_node(&mut self, id: NodeId) -> MutationResult<()> {
        ops::delete_node(self.graph, self.cache, self.catalog, self.ops, id)
    }

    /// Set (or with `None`, clear) the occupant of a slot, returning the
    /// displaced occupant. Fans the change out to every derivative of
    /// `parent`. The displaced occupant stays in the arena, detached.
    pub fn set_child(
        &mut self,
        parent: NodeId,
        slot: SlotTag,
        child: Option<NodeId>,
    ) -> MutationResult<Option<NodeId>> {
        ops::set_child(self.graph, self.cache, self.catalog, self.ops, parent, slot, child)
    }

    /// Register a detached node as a root.
    pub fn add_root(&mut self, id: NodeId) -> MutationResult<()> {
        ops::add_root(self.graph, self.ops, id)
    }

    /// Unregister a root; the node stays in the arena, detached.
    pub fn remove_root(&mut self, id: NodeId) -> MutationResult<()> {
        ops::remove_root(self.graph, self.ops, id)
    }

    /// Set (or with `None`, remove) an attribute, returning the previous
    /// value.
    pub fn set_attr(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<Value>,
    ) -> MutationResult<Option<Value>> {
        ops::set_attr(self.graph, self.ops, node, name, value)
    }

    /// Declare `derivative` a derivative of `original`.
    pub fn link_derivative(&mut self, original: NodeId, derivative: NodeId) -> MutationResult<()> {
        ops::link_derivative(self.graph, self.cache, self.ops, original, derivative)
    }

    /// Sever the derivative link between the two nodes.
    pub fn unlink_derivative(
        &mut self,
        original: NodeId,
        derivative: NodeId,
    ) -> MutationResult<()> {
        ops::unlink_derivative(self.graph, self.cache, self.ops, original, derivative)
    }

    /// Set the selection flag, returning the previous value.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> MutationResult<bool> {
        ops::set_selected(self.graph, self.ops, id, selected)
    }

    /// Set the breakpoint flag, returning the previous value.
    pub fn set_breakpoint(&mut self, id: NodeId, breakpoint: bool) -> MutationResult<bool> {
        ops::set_breakpoint(self.graph, self.ops, id, breakpoint)
    }

    /// Remove every node still scheduled for delayed deletion from the
    /// arena, with compensations. Called by the coordinator at commit.
    pub fn purge_delayed(&mut self) -> MutationResult<PurgeOutcome> {
        ops::purge_delayed(self.graph, self.ops)
    }
}
