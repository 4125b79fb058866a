//! Atomic compensation records.

use crate::composite::UserOp;
use warren_core::{NodeId, SlotTag, Value};
use warren_graph::{Graph, GraphResult, Node};

/// One atomic compensating action.
///
/// Each variant names a forward effect that already happened and carries the
/// data needed to invert it. [`Op::invert`] applies the inverse to the graph
/// and pushes the inverse-of-the-inverse onto the output composite.
#[derive(Debug, Clone)]
pub enum Op {
    /// A slot on `parent` changed occupants; `prev` is the occupant to
    /// restore.
    ChildSet {
        parent: NodeId,
        slot: SlotTag,
        prev: Option<NodeId>,
    },
    /// An attribute changed; `prev` is the value to restore (`None` removes).
    AttrSet {
        node: NodeId,
        name: String,
        prev: Option<Value>,
    },
    /// The node was registered as a root.
    RootAdded { node: NodeId },
    /// The node was unregistered as a root; `index` is the position it held.
    RootRemoved { node: NodeId, index: usize },
    /// A derivative link was created.
    DerivativeLinked {
        original: NodeId,
        derivative: NodeId,
    },
    /// A derivative link was severed.
    DerivativeUnlinked {
        original: NodeId,
        derivative: NodeId,
    },
    /// The node entered the arena.
    NodeCreated { node: NodeId },
    /// The node left the arena; its full data rides along for restoration.
    NodeRemoved { node: Box<Node> },
    /// The validity flag flipped; `prev` is the flag to restore.
    InvalidSet { node: NodeId, prev: bool },
    /// The selection flag changed; `prev` is the flag to restore.
    SelectedSet { node: NodeId, prev: bool },
    /// The breakpoint flag changed; `prev` is the flag to restore.
    BreakpointSet { node: NodeId, prev: bool },
}

impl Op {
    /// Apply the inverse of this record to `graph`, pushing the record that
    /// undoes the inverse onto `out`.
    pub fn invert(self, graph: &mut Graph, out: &mut UserOp) -> GraphResult<()> {
        match self {
            Op::ChildSet { parent, slot, prev } => {
                let current = graph.set_child(parent, slot, prev)?;
                out.push(Op::ChildSet {
                    parent,
                    slot,
                    prev: current,
                });
            }
            Op::AttrSet { node, name, prev } => {
                let current = graph.set_attr(node, &name, prev)?;
                out.push(Op::AttrSet {
                    node,
                    name,
                    prev: current,
                });
            }
            Op::RootAdded { node } => {
                let index = graph.remove_root(node)?;
                out.push(Op::RootRemoved { node, index });
            }
            Op::RootRemoved { node, index } => {
                graph.insert_root_at(node, index)?;
                out.push(Op::RootAdded { node });
            }
            Op::DerivativeLinked {
                original,
                derivative,
            } => {
                graph.unlink_derivative(original, derivative)?;
                out.push(Op::DerivativeUnlinked {
                    original,
                    derivative,
                });
            }
            Op::DerivativeUnlinked {
                original,
                derivative,
            } => {
                graph.link_derivative(original, derivative)?;
                out.push(Op::DerivativeLinked {
                    original,
                    derivative,
                });
            }
            Op::NodeCreated { node } => {
                let data = graph.remove_node(node)?;
                out.push(Op::NodeRemoved {
                    node: Box::new(data),
                });
            }
            Op::NodeRemoved { node } => {
                let id = node.id;
                graph.insert_node(*node)?;
                out.push(Op::NodeCreated { node: id });
            }
            Op::InvalidSet { node, prev } => {
                graph.set_invalid(node, prev)?;
                out.push(Op::InvalidSet { node, prev: !prev });
            }
            Op::SelectedSet { node, prev } => {
                let current = graph.set_selected(node, prev)?;
                out.push(Op::SelectedSet {
                    node,
                    prev: current,
                });
            }
            Op::BreakpointSet { node, prev } => {
                let current = graph.set_breakpoint(node, prev)?;
                out.push(Op::BreakpointSet {
                    node,
                    prev: current,
                });
            }
        }
        Ok(())
    }
}
