//! Graph error types.

use thiserror::Error;
use warren_core::NodeId;

/// Errors from graph structure operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Node does not exist in the arena.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with this id is already present in the arena.
    #[error("node already exists: {0}")]
    NodeAlreadyExists(NodeId),

    /// The requested edge would make the node an ancestor or original of
    /// itself.
    #[error("edge would create a cycle through {0}")]
    WouldCreateCycle(NodeId),

    /// The node is already attached to a parent or is a root.
    #[error("node already attached: {0}")]
    AlreadyAttached(NodeId),

    /// The node is already registered as a root.
    #[error("node is already a root: {0}")]
    AlreadyRoot(NodeId),

    /// The node is not a root.
    #[error("node is not a root: {0}")]
    NotRoot(NodeId),

    /// The node already has an original.
    #[error("node is already a derivative: {0}")]
    AlreadyDerivative(NodeId),

    /// No derivative link exists between the two nodes.
    #[error("{derivative} is not a derivative of {original}")]
    NotLinked {
        original: NodeId,
        derivative: NodeId,
    },

    /// The node still has structural edges and cannot leave the arena.
    #[error("node still has edges: {0}")]
    NotDetached(NodeId),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
