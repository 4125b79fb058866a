//! Attribute and flag updates.

use warren_core::{NodeId, Value};
use warren_graph::Graph;
use warren_oplog::{Op, UserOp};

use crate::error::MutationResult;

/// Set (or remove) an attribute, logging the previous value.
pub(crate) fn set_attr(
    graph: &mut Graph,
    ops: &mut UserOp,
    node: NodeId,
    name: &str,
    value: Option<Value>,
) -> MutationResult<Option<Value>> {
    let prev = graph.set_attr(node, name, value)?;
    ops.push(Op::AttrSet {
        node,
        name: name.to_string(),
        prev: prev.clone(),
    });
    Ok(prev)
}

/// Set the selection flag, logging only on an actual change.
pub(crate) fn set_selected(
    graph: &mut Graph,
    ops: &mut UserOp,
    node: NodeId,
    selected: bool,
) -> MutationResult<bool> {
    let prev = graph.set_selected(node, selected)?;
    if prev != selected {
        ops.push(Op::SelectedSet { node, prev });
    }
    Ok(prev)
}

/// Set the breakpoint flag, logging only on an actual change.
pub(crate) fn set_breakpoint(
    graph: &mut Graph,
    ops: &mut UserOp,
    node: NodeId,
    breakpoint: bool,
) -> MutationResult<bool> {
    let prev = graph.set_breakpoint(node, breakpoint)?;
    if prev != breakpoint {
        ops.push(Op::BreakpointSet { node, prev });
    }
    Ok(prev)
}
