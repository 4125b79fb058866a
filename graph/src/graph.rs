//! Document graph storage.

use crate::error::{GraphError, GraphResult};
use crate::node::{Node, ParentLink};
use std::collections::{HashMap, HashSet};
use warren_core::{Attributes, KindId, NodeId, SlotTag, Value};

/// ID allocator for nodes.
#[derive(Debug, Default)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

/// The in-memory document graph.
///
/// Besides the node arena and its two edge families (parent/child through
/// slots, original/derivative), the graph carries transient per-transaction
/// state: the dirty seed set drained by the error propagation pass, the
/// delayed-deletion candidates, and the invalid-node index.
///
/// Structural mutators keep both directions of every edge consistent and
/// reject edges that would create a cycle. They also record dirty seeds, so
/// seed bookkeeping lives in exactly one place.
#[derive(Debug, Default)]
pub struct Graph {
    /// Node storage.
    nodes: HashMap<NodeId, Node>,
    /// Root nodes, in insertion order.
    roots: Vec<NodeId>,
    /// Nodes currently failing their validity predicate.
    invalid: HashSet<NodeId>,
    /// Nodes touched since the last error propagation pass.
    seeds: HashSet<NodeId>,
    /// Nodes detached mid-cascade, awaiting purge at commit.
    delayed: HashSet<NodeId>,
    /// ID allocator.
    id_alloc: IdAllocator,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            invalid: HashSet::new(),
            seeds: HashSet::new(),
            delayed: HashSet::new(),
            id_alloc: IdAllocator::new(),
        }
    }

    // ==================== Node Arena ====================

    /// Create a new detached node with the given kind and attributes.
    pub fn create_node(&mut self, kind: KindId, attributes: Attributes) -> NodeId {
        let id = self.id_alloc.alloc_node_id();
        self.nodes.insert(id, Node::new(id, kind, attributes));
        id
    }

    /// Re-insert a previously removed node (undo of a purge).
    pub fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::NodeAlreadyExists(node.id));
        }
        let id = node.id;
        if node.invalid {
            self.invalid.insert(id);
        }
        self.nodes.insert(id, node);
        self.seeds.insert(id);
        Ok(())
    }

    /// Remove a fully detached node from the arena, returning its data.
    ///
    /// The node must have no parent, children, original or derivatives and
    /// must not be a root; callers sever edges (with compensations) first.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        if !node.is_detached() || self.is_root(id) {
            return Err(GraphError::NotDetached(id));
        }
        self.invalid.remove(&id);
        self.seeds.remove(&id);
        self.delayed.remove(&id);
        Ok(self.nodes.remove(&id).expect("presence checked above"))
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns true if the node exists in the arena.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    // ==================== Parent / Child Edges ====================

    /// Set the occupant of `slot` on `parent`, returning the previous
    /// occupant.
    ///
    /// `None` clears the slot. The new child must be detached (no parent,
    /// not a root). Attaching cancels any pending delayed deletion of the
    /// child. Parent, new child and previous occupant are recorded as dirty
    /// seeds.
    pub fn set_child(
        &mut self,
        parent: NodeId,
        slot: SlotTag,
        child: Option<NodeId>,
    ) -> GraphResult<Option<NodeId>> {
        if !self.contains(parent) {
            return Err(GraphError::NodeNotFound(parent));
        }
        let prev = self.child_at(parent, slot);
        if prev == child {
            return Ok(prev);
        }
        if let Some(child_id) = child {
            let node = self
                .nodes
                .get(&child_id)
                .ok_or(GraphError::NodeNotFound(child_id))?;
            if node.parent.is_some() || self.is_root(child_id) {
                return Err(GraphError::AlreadyAttached(child_id));
            }
            if child_id == parent || self.is_ancestor(child_id, parent) {
                return Err(GraphError::WouldCreateCycle(child_id));
            }
        }

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.nodes.get_mut(&prev_id) {
                prev_node.parent = None;
            }
            self.seeds.insert(prev_id);
        }
        match child {
            Some(child_id) => {
                let parent_node = self.nodes.get_mut(&parent).expect("presence checked above");
                parent_node.children.insert(slot, child_id);
                let child_node = self.nodes.get_mut(&child_id).expect("presence checked above");
                child_node.parent = Some(ParentLink { parent, slot });
                self.delayed.remove(&child_id);
                self.seeds.insert(child_id);
            }
            None => {
                let parent_node = self.nodes.get_mut(&parent).expect("presence checked above");
                parent_node.children.remove(&slot);
            }
        }
        self.seeds.insert(parent);
        Ok(prev)
    }

    /// The child occupying `slot` on `parent`, if any.
    pub fn child_at(&self, parent: NodeId, slot: SlotTag) -> Option<NodeId> {
        self.nodes.get(&parent).and_then(|n| n.child(slot))
    }

    /// Returns true if `ancestor` appears on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while let Some(link) = self.nodes.get(&current).and_then(|n| n.parent) {
            if link.parent == ancestor {
                return true;
            }
            current = link.parent;
        }
        false
    }

    /// Returns true if the node is a root or hangs under one.
    pub fn is_root_reachable(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if self.is_root(current) {
                return true;
            }
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(link) => current = link.parent,
                None => return false,
            }
        }
    }

    // ==================== Roots ====================

    /// Register a detached node as a root. Cancels pending delayed deletion.
    pub fn add_root(&mut self, id: NodeId) -> GraphResult<()> {
        self.insert_root_at(id, self.roots.len())
    }

    /// Register a detached node as a root at a specific position (undo path).
    pub fn insert_root_at(&mut self, id: NodeId, index: usize) -> GraphResult<()> {
        let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        if self.is_root(id) {
            return Err(GraphError::AlreadyRoot(id));
        }
        if node.parent.is_some() {
            return Err(GraphError::AlreadyAttached(id));
        }
        let index = index.min(self.roots.len());
        self.roots.insert(index, id);
        self.delayed.remove(&id);
        self.seeds.insert(id);
        Ok(())
    }

    /// Unregister a root, returning the position it occupied.
    pub fn remove_root(&mut self, id: NodeId) -> GraphResult<usize> {
        let index = self
            .roots
            .iter()
            .position(|r| *r == id)
            .ok_or(GraphError::NotRoot(id))?;
        self.roots.remove(index);
        self.seeds.insert(id);
        Ok(index)
    }

    /// The root nodes in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns true if the node is a root.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.roots.contains(&id)
    }

    // ==================== Attributes ====================

    /// Set (or with `None`, remove) an attribute, returning the previous
    /// value.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: &str,
        value: Option<Value>,
    ) -> GraphResult<Option<Value>> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        let prev = match value {
            Some(value) => {
                let prev = node.attributes.get(name).cloned();
                node.set_attr(name.to_string(), value);
                prev
            }
            None => node.remove_attr(name),
        };
        self.seeds.insert(id);
        Ok(prev)
    }

    // ==================== Original / Derivative Edges ====================

    /// Declare `derivative` a derivative of `original`.
    ///
    /// A node mirrors at most one original, and the original chain must stay
    /// acyclic; both are checked here rather than discovered during
    /// traversal.
    pub fn link_derivative(&mut self, original: NodeId, derivative: NodeId) -> GraphResult<()> {
        if !self.contains(original) {
            return Err(GraphError::NodeNotFound(original));
        }
        let node = self
            .nodes
            .get(&derivative)
            .ok_or(GraphError::NodeNotFound(derivative))?;
        if node.original.is_some() {
            return Err(GraphError::AlreadyDerivative(derivative));
        }
        // Walk the original chain upward from `original`; finding
        // `derivative` there means the new edge would close a loop.
        let mut current = original;
        loop {
            if current == derivative {
                return Err(GraphError::WouldCreateCycle(derivative));
            }
            match self.nodes.get(&current).and_then(|n| n.original) {
                Some(next) => current = next,
                None => break,
            }
        }

        self.nodes
            .get_mut(&original)
            .expect("presence checked above")
            .derivatives
            .push(derivative);
        self.nodes
            .get_mut(&derivative)
            .expect("presence checked above")
            .original = Some(original);
        self.seeds.insert(original);
        self.seeds.insert(derivative);
        Ok(())
    }

    /// Remove the derivative link between the two nodes.
    pub fn unlink_derivative(&mut self, original: NodeId, derivative: NodeId) -> GraphResult<()> {
        let node = self
            .nodes
            .get(&derivative)
            .ok_or(GraphError::NodeNotFound(derivative))?;
        if node.original != Some(original) {
            return Err(GraphError::NotLinked {
                original,
                derivative,
            });
        }
        self.nodes
            .get_mut(&derivative)
            .expect("presence checked above")
            .original = None;
        if let Some(orig_node) = self.nodes.get_mut(&original) {
            orig_node.derivatives.retain(|d| *d != derivative);
        }
        self.seeds.insert(original);
        self.seeds.insert(derivative);
        Ok(())
    }

    /// The original of a node, if it is a derivative.
    pub fn original_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.original)
    }

    /// The direct derivatives of a node (empty for unknown ids).
    pub fn derivatives_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.derivatives()).unwrap_or(&[])
    }

    /// Resolve the last original on the chain starting at `id`.
    ///
    /// Returns `id` itself when the node is not a derivative.
    pub fn ultimate_original(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(original) = self.nodes.get(&current).and_then(|n| n.original) {
            current = original;
        }
        current
    }

    // ==================== Validity Index ====================

    /// Set the validity annotation. Returns true if the state changed.
    pub fn set_invalid(&mut self, id: NodeId, invalid: bool) -> GraphResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        if node.invalid == invalid {
            return Ok(false);
        }
        node.invalid = invalid;
        if invalid {
            self.invalid.insert(id);
        } else {
            self.invalid.remove(&id);
        }
        Ok(true)
    }

    /// The set of nodes currently failing their validity predicate.
    pub fn invalid_nodes(&self) -> &HashSet<NodeId> {
        &self.invalid
    }

    // ==================== Auxiliary Flags ====================

    /// Set the selection flag. Returns the previous value.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> GraphResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        let prev = node.selected;
        node.selected = selected;
        Ok(prev)
    }

    /// Set the breakpoint flag. Returns the previous value.
    pub fn set_breakpoint(&mut self, id: NodeId, breakpoint: bool) -> GraphResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        let prev = node.breakpoint;
        node.breakpoint = breakpoint;
        Ok(prev)
    }

    // ==================== Dirty Seeds ====================

    /// Record a node as touched since the last error propagation pass.
    pub fn mark_seed(&mut self, id: NodeId) {
        self.seeds.insert(id);
    }

    /// The current dirty seed set.
    pub fn seeds(&self) -> &HashSet<NodeId> {
        &self.seeds
    }

    /// Drain the dirty seed set.
    pub fn take_seeds(&mut self) -> HashSet<NodeId> {
        std::mem::take(&mut self.seeds)
    }

    // ==================== Delayed Deletion ====================

    /// Mark a node as awaiting purge at commit. Reattaching the node (via
    /// [`Graph::set_child`] or [`Graph::add_root`]) cancels the mark.
    pub fn mark_delayed(&mut self, id: NodeId) -> GraphResult<()> {
        if !self.contains(id) {
            return Err(GraphError::NodeNotFound(id));
        }
        self.delayed.insert(id);
        Ok(())
    }

    /// Returns true if the node is awaiting purge.
    pub fn is_delayed(&self, id: NodeId) -> bool {
        self.delayed.contains(&id)
    }

    /// Drain the delayed-deletion set.
    pub fn take_delayed(&mut self) -> HashSet<NodeId> {
        std::mem::take(&mut self.delayed)
    }
}
