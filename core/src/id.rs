//! Identity types for the node graph.
//!
//! All edges in the document are represented as ids into the node arena, not
//! owning references, so cyclic backreferences (node↔parent, node↔original)
//! never form ownership cycles.

use std::fmt;

/// Unique identifier for a node in the document graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new node ID.
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifier for a node kind (reference to the external node-definition
/// catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(pub u64);

impl KindId {
    /// Create a new kind ID.
    pub fn new(id: u64) -> Self {
        KindId(id)
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// Stable tag naming a connector slot on a node.
///
/// Derivatives mirror an original's structure anchored at these tags rather
/// than at positions, so a tag stays meaningful across structural edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotTag(pub u64);

impl SlotTag {
    /// Create a new slot tag.
    pub fn new(id: u64) -> Self {
        SlotTag(id)
    }
}

impl fmt::Display for SlotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Named logical resource used for coarse, non-blocking mutual exclusion
/// between categories of operations (e.g. interactive edits vs. a background
/// save).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId(pub u64);

impl DomainId {
    /// Create a new exclusion domain ID.
    pub fn new(id: u64) -> Self {
        DomainId(id)
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}
