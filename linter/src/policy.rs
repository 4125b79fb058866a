//! Validity predicate seam.

use warren_core::NodeId;
use warren_graph::Graph;

/// The host-supplied validity predicate.
///
/// The engine decides *which* nodes to re-evaluate and *when*; what makes a
/// node valid (missing required slots, kind mismatches, orphaned references)
/// belongs to the node-definition layer and comes in through this trait.
pub trait ValidityPolicy {
    /// Returns true if the node is currently valid.
    fn is_valid(&self, graph: &Graph, node: NodeId) -> bool;
}
