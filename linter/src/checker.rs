//! Seed expansion and invalid-set maintenance.

use std::collections::{HashSet, VecDeque};
use tracing::debug;
use warren_core::NodeId;
use warren_graph::Graph;
use warren_oplog::{Op, UserOp};

use crate::error::LintResult;
use crate::policy::ValidityPolicy;

/// Validity transitions produced by one check pass. The coordinator turns
/// these into invalid-node-added / invalid-node-removed notifications.
#[derive(Debug, Default)]
pub struct LintOutcome {
    /// Nodes that became invalid.
    pub added: Vec<NodeId>,
    /// Nodes that became valid again.
    pub removed: Vec<NodeId>,
    /// Number of nodes re-evaluated.
    pub checked: usize,
}

/// The error propagation engine.
pub struct ErrorChecker<'p> {
    policy: &'p dyn ValidityPolicy,
}

impl<'p> ErrorChecker<'p> {
    /// Create a checker over the host's validity policy.
    pub fn new(policy: &'p dyn ValidityPolicy) -> Self {
        Self { policy }
    }

    /// Drain the graph's dirty seeds, expand them to their transitive
    /// closure over parent, children, original and derivative edges, and
    /// re-evaluate the policy for every node reached. Each actual flag
    /// transition pushes its compensation onto `ops`.
    pub fn check(&self, graph: &mut Graph, ops: &mut UserOp) -> LintResult<LintOutcome> {
        let seeds = graph.take_seeds();
        let closure = expand(graph, seeds);
        let mut outcome = LintOutcome::default();
        for id in closure {
            outcome.checked += 1;
            let invalid = !self.policy.is_valid(graph, id);
            if graph.set_invalid(id, invalid)? {
                ops.push(Op::InvalidSet {
                    node: id,
                    prev: !invalid,
                });
                if invalid {
                    outcome.added.push(id);
                } else {
                    outcome.removed.push(id);
                }
            }
        }
        if !outcome.added.is_empty() || !outcome.removed.is_empty() {
            debug!(
                added = outcome.added.len(),
                removed = outcome.removed.len(),
                checked = outcome.checked,
                "validity transitions"
            );
        }
        Ok(outcome)
    }
}

/// Breadth-first closure over all four edge families, visited-set guarded so
/// each reachable node is evaluated exactly once. Seeds for nodes no longer
/// in the arena are dropped.
fn expand(graph: &Graph, seeds: HashSet<NodeId>) -> Vec<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order: Vec<NodeId> = Vec::new();
    let mut queue: VecDeque<NodeId> = seeds
        .into_iter()
        .filter(|id| graph.contains(*id))
        .collect();
    for id in &queue {
        visited.insert(*id);
    }
    while let Some(id) = queue.pop_front() {
        order.push(id);
        let Some(node) = graph.node(id) else { continue };
        let neighbors = node
            .parent()
            .map(|link| link.parent)
            .into_iter()
            .chain(node.children().map(|(_, child)| child))
            .chain(node.original())
            .chain(node.derivatives().iter().copied());
        for next in neighbors {
            if graph.contains(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    order
}
