//! Mutation outcome reporting.

use warren_core::NodeId;

/// What a commit-time purge removed.
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    /// Number of nodes removed from the arena.
    pub purged: usize,
    /// Removed nodes that were still flagged invalid; the coordinator
    /// reports these through its invalid-removed notifications.
    pub invalid: Vec<NodeId>,
}
