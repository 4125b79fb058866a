//! Structural graph snapshots for exact before/after comparison.

use std::collections::BTreeMap;
use warren_core::Value;
use warren_graph::Graph;

/// One node's observable state, keyed by raw ids for stable ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub kind: u64,
    pub attributes: BTreeMap<String, Value>,
    pub parent: Option<(u64, u64)>,
    pub children: BTreeMap<u64, u64>,
    pub original: Option<u64>,
    pub derivatives: Vec<u64>,
    pub invalid: bool,
    pub selected: bool,
    pub breakpoint: bool,
}

/// The whole document's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: BTreeMap<u64, NodeSnapshot>,
    pub roots: Vec<u64>,
}

/// Capture everything undo is expected to restore.
pub fn snapshot(graph: &Graph) -> GraphSnapshot {
    let mut nodes = BTreeMap::new();
    for id in graph.node_ids() {
        let node = graph.node(id).expect("listed id is present");
        let mut derivatives: Vec<u64> = node.derivatives().iter().map(|d| d.0).collect();
        derivatives.sort_unstable();
        nodes.insert(
            id.0,
            NodeSnapshot {
                kind: node.kind.0,
                attributes: node
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                parent: node.parent().map(|link| (link.parent.0, link.slot.0)),
                children: node.children().map(|(slot, child)| (slot.0, child.0)).collect(),
                original: node.original().map(|o| o.0),
                derivatives,
                invalid: node.is_invalid(),
                selected: node.is_selected(),
                breakpoint: node.has_breakpoint(),
            },
        );
    }
    GraphSnapshot {
        nodes,
        roots: graph.roots().iter().map(|r| r.0).collect(),
    }
}
