//! Linter error types.

use thiserror::Error;
use warren_graph::GraphError;

/// Errors from validity propagation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LintError {
    /// The underlying graph rejected a flag update.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for linter operations.
pub type LintResult<T> = Result<T, LintError>;
