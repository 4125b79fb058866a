//! Coordinator error types.

use thiserror::Error;
use warren_history::HistoryError;
use warren_linter::LintError;
use warren_mutation::MutationError;

/// Errors surfaced through the coordinator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxnError {
    /// A mutation primitive failed during the commit pipeline.
    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// Validity propagation failed.
    #[error(transparent)]
    Lint(#[from] LintError),

    /// An undo or redo replay failed.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Result type for coordinator operations.
pub type TxnResult<T> = Result<T, TxnError>;
