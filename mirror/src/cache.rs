//! Per-transaction derivative memoization.

use std::collections::{HashMap, HashSet};
use warren_core::NodeId;
use warren_graph::Graph;

/// Memoized derivative sets, keyed by ultimate original.
///
/// `get` computes the transitive derivative closure of a node's ultimate
/// original on first use and serves the cached set afterwards; the sync
/// pass resolves its fan-out through it. `put` and `remove` keep memoized
/// sets current as links change mid-transaction. Entries stay correct only
/// while the underlying edges do, so the coordinator calls
/// [`DerivativeCache::clear_all`] at every commit.
#[derive(Debug, Default)]
pub struct DerivativeCache {
    entries: HashMap<NodeId, HashSet<NodeId>>,
}

impl DerivativeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Index a derivative under its ultimate original. No-op when the node
    /// is not a derivative or its original's set has not been memoized yet.
    ///
    /// A newly linked derivative may carry derivatives of its own; those
    /// join the memoized set with it.
    pub fn put(&mut self, graph: &Graph, derivative: NodeId) {
        if graph.original_of(derivative).is_none() {
            return;
        }
        let key = graph.ultimate_original(derivative);
        if let Some(set) = self.entries.get_mut(&key) {
            set.insert(derivative);
            set.extend(collect_closure(graph, derivative));
        }
    }

    /// All nodes transitively mirroring `original`'s ultimate original.
    pub fn get(&mut self, graph: &Graph, original: NodeId) -> &HashSet<NodeId> {
        let key = graph.ultimate_original(original);
        self.entries
            .entry(key)
            .or_insert_with(|| collect_closure(graph, key))
    }

    /// Drop a derivative (and any derivatives it carries with it) from its
    /// original's memoized set, if present. A memoized entry keyed by the
    /// departing node itself is stale and dropped too.
    pub fn remove(&mut self, graph: &Graph, derivative: NodeId) {
        let key = graph.ultimate_original(derivative);
        if let Some(set) = self.entries.get_mut(&key) {
            set.remove(&derivative);
            for member in collect_closure(graph, derivative) {
                set.remove(&member);
            }
        }
        self.entries.remove(&derivative);
    }

    /// Invalidate every memoized set.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized originals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk the derivative edges transitively from `root`, excluding `root`
/// itself.
fn collect_closure(graph: &Graph, root: NodeId) -> HashSet<NodeId> {
    let mut found = HashSet::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        for derivative in graph.derivatives_of(id) {
            if found.insert(*derivative) {
                pending.push(*derivative);
            }
        }
    }
    found
}
