//! Warren History
//!
//! Bounded undo/redo stacks over committed [`warren_oplog::UserOp`]
//! composites, plus the document dirty flag and stack-change notifications.

mod error;
mod manager;

pub use error::{HistoryError, HistoryResult};
pub use manager::{UndoRedoManager, UndoStackEvent};
