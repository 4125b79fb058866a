//! Validity policies for scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warren_core::{NodeId, Value};
use warren_graph::Graph;
use warren_linter::ValidityPolicy;

/// A node is invalid while its "broken" attribute is true.
#[derive(Debug)]
pub struct BrokenAttrPolicy;

impl ValidityPolicy for BrokenAttrPolicy {
    fn is_valid(&self, graph: &Graph, node: NodeId) -> bool {
        graph
            .node(node)
            .and_then(|n| n.get_attr("broken"))
            .and_then(Value::as_bool)
            != Some(true)
    }
}

/// Wraps [`BrokenAttrPolicy`] and counts evaluations, for asserting how many
/// nodes a check pass visited.
#[derive(Debug, Default)]
pub struct CountingPolicy {
    evaluations: Arc<AtomicUsize>,
}

impl CountingPolicy {
    /// Create a counting policy and a handle to its evaluation counter.
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let evaluations = Arc::new(AtomicUsize::new(0));
        (
            Self {
                evaluations: evaluations.clone(),
            },
            evaluations,
        )
    }
}

impl ValidityPolicy for CountingPolicy {
    fn is_valid(&self, graph: &Graph, node: NodeId) -> bool {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        BrokenAttrPolicy.is_valid(graph, node)
    }
}
