//! Undo/redo stack management.

use std::collections::VecDeque;
use tracing::debug;
use warren_core::{Callbacks, Subscription};
use warren_graph::Graph;
use warren_oplog::UserOp;

use crate::error::HistoryResult;

/// Payload of an undo-stack-changed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoStackEvent {
    /// Edits available to undo.
    pub undo_count: usize,
    /// Edits available to redo.
    pub redo_count: usize,
}

/// Bounded undo/redo stacks for one document.
///
/// A committed edit always lands on the undo stack and invalidates redo;
/// the oldest entry is evicted once the stack exceeds its limit. The dirty
/// flag tracks whether the document has changed since it was last marked
/// clean (saved).
pub struct UndoRedoManager {
    undo: VecDeque<UserOp>,
    redo: VecDeque<UserOp>,
    limit: usize,
    dirty: bool,
    on_change: Callbacks<UndoStackEvent>,
}

impl UndoRedoManager {
    /// Create a manager keeping at most `limit` undoable edits.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            limit,
            dirty: false,
            on_change: Callbacks::new(),
        }
    }

    /// Record a committed edit. Empty composites are dropped; everything
    /// else clears the redo stack, evicts the oldest entry over capacity,
    /// and marks the document dirty.
    pub fn push(&mut self, op: UserOp) {
        if op.is_empty() {
            return;
        }
        self.undo.push_back(op);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
        self.dirty = true;
        self.notify();
    }

    /// Undo the most recent edit. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self, graph: &mut Graph) -> HistoryResult<bool> {
        let Some(op) = self.undo.pop_back() else {
            return Ok(false);
        };
        debug!(entries = op.len(), "undo");
        let inverse = op.invert(graph)?;
        self.redo.push_back(inverse);
        self.dirty = true;
        self.notify();
        Ok(true)
    }

    /// Redo the most recently undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, graph: &mut Graph) -> HistoryResult<bool> {
        let Some(op) = self.redo.pop_back() else {
            return Ok(false);
        };
        debug!(entries = op.len(), "redo");
        let inverse = op.invert(graph)?;
        self.undo.push_back(inverse);
        self.dirty = true;
        self.notify();
        Ok(true)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.notify();
    }

    /// Edits available to undo.
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    /// Edits available to redo.
    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    /// Returns true if the document changed since it was last marked clean.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document clean (saved).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Subscribe to stack-change notifications.
    pub fn subscribe_changed(
        &mut self,
        callback: impl Fn(&UndoStackEvent) + Send + 'static,
    ) -> Subscription {
        self.on_change.subscribe(callback)
    }

    /// Remove a stack-change subscription.
    pub fn unsubscribe_changed(&mut self, subscription: Subscription) -> bool {
        self.on_change.unsubscribe(subscription)
    }

    fn notify(&self) {
        self.on_change.emit(&UndoStackEvent {
            undo_count: self.undo.len(),
            redo_count: self.redo.len(),
        });
    }
}
