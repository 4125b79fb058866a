//! History error types.

use thiserror::Error;
use warren_graph::GraphError;

/// Errors from undo/redo replay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// A compensation failed to apply to the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
