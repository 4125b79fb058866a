//! The per-transaction composite of compensation records.

use crate::op::Op;
use warren_graph::{Graph, GraphResult};

/// One logical user edit: the compensations for every atomic mutation the
/// edit performed, in execution order.
///
/// Inversion consumes the composite. Committing moves the composite by value
/// into the history, so entries cannot be appended after commit.
#[derive(Debug, Default)]
pub struct UserOp {
    ops: Vec<Op>,
}

impl UserOp {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Append a compensation record.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Number of compensation records.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if no compensation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Undo this edit: apply every compensation in reverse execution order,
    /// returning the composite that redoes it.
    pub fn invert(mut self, graph: &mut Graph) -> GraphResult<UserOp> {
        let mut out = UserOp::new();
        while let Some(op) = self.ops.pop() {
            op.invert(graph, &mut out)?;
        }
        Ok(out)
    }
}
