//! Mutation error types.

use thiserror::Error;
use warren_graph::GraphError;

/// Errors from logged mutation primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The underlying graph rejected the change.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;
