//! Node structure for the document graph.

use std::collections::BTreeMap;
use warren_core::{Attributes, KindId, NodeId, SlotTag, Value};

/// The parent edge of a node: which node holds it, through which connector
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    /// The holding node.
    pub parent: NodeId,
    /// The connector slot on the parent.
    pub slot: SlotTag,
}

/// A node in the document graph.
///
/// Structural fields (parent, children, derivative links) are maintained by
/// [`crate::Graph`] so both directions of every edge stay consistent; they
/// are read-only here.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Kind of this node (reference to the node-definition catalog).
    pub kind: KindId,
    /// Version number, bumped on attribute change.
    pub version: u64,
    /// Attribute values.
    pub attributes: Attributes,
    pub(crate) parent: Option<ParentLink>,
    pub(crate) children: BTreeMap<SlotTag, NodeId>,
    pub(crate) original: Option<NodeId>,
    pub(crate) derivatives: Vec<NodeId>,
    pub(crate) invalid: bool,
    pub(crate) selected: bool,
    pub(crate) breakpoint: bool,
}

impl Node {
    /// Create a new detached node.
    pub fn new(id: NodeId, kind: KindId, attributes: Attributes) -> Self {
        Self {
            id,
            kind,
            version: 1,
            attributes,
            parent: None,
            children: BTreeMap::new(),
            original: None,
            derivatives: Vec::new(),
            invalid: false,
            selected: false,
            breakpoint: false,
        }
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: String, value: Value) {
        self.attributes.insert(name, value);
        self.version += 1;
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        let result = self.attributes.remove(name);
        if result.is_some() {
            self.version += 1;
        }
        result
    }

    /// The parent edge, if this node is held by another node.
    pub fn parent(&self) -> Option<ParentLink> {
        self.parent
    }

    /// The child occupying the given connector slot.
    pub fn child(&self, slot: SlotTag) -> Option<NodeId> {
        self.children.get(&slot).copied()
    }

    /// Iterate over (slot, child) pairs in slot order.
    pub fn children(&self) -> impl Iterator<Item = (SlotTag, NodeId)> + '_ {
        self.children.iter().map(|(slot, id)| (*slot, *id))
    }

    /// The original this node mirrors, if it is a derivative.
    pub fn original(&self) -> Option<NodeId> {
        self.original
    }

    /// Returns true if this node is a derivative of some original.
    pub fn is_derivative(&self) -> bool {
        self.original.is_some()
    }

    /// The direct derivatives of this node.
    pub fn derivatives(&self) -> &[NodeId] {
        &self.derivatives
    }

    /// Validity annotation, maintained by the error propagation engine.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Selection flag.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Breakpoint flag.
    pub fn has_breakpoint(&self) -> bool {
        self.breakpoint
    }

    /// Returns true if the node has no structural edges at all.
    pub fn is_detached(&self) -> bool {
        self.parent.is_none()
            && self.children.is_empty()
            && self.original.is_none()
            && self.derivatives.is_empty()
    }
}
