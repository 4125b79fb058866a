//! The per-document transaction coordinator.

use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use tracing::debug;
use warren_core::{Callbacks, DomainId, NodeId, Subscription, DEFAULT_UNDO_LIMIT};
use warren_graph::Graph;
use warren_history::{UndoRedoManager, UndoStackEvent};
use warren_linter::{ErrorChecker, ValidityPolicy};
use warren_mirror::{DerivativeCache, TemplateCatalog};
use warren_mutation::Mutator;
use warren_oplog::UserOp;

use crate::domains::DomainLedger;
use crate::error::TxnResult;
use crate::lock::ReentrantRwLock;

/// Construction-time knobs for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of undoable edits kept.
    pub undo_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

/// Token for one `begin`/`end` pair. Records the exclusion domains the
/// matching `end` must release.
#[must_use = "a begun transaction must be ended"]
#[derive(Debug)]
pub struct Context {
    domains: Vec<DomainId>,
}

/// Document state guarded by the data lock.
struct DocState {
    graph: Graph,
    cache: DerivativeCache,
}

/// Transaction-progress state guarded by its own mutex.
#[derive(Default)]
struct TxnState {
    nesting: usize,
    active: Option<UserOp>,
}

/// The transaction coordinator for one document.
///
/// Serializes logical edits: `begin` claims exclusion domains and the
/// gesture-scope write lock, `mutate` hands the caller a logged [`Mutator`],
/// and the outermost `end` runs the commit pipeline: purge delayed
/// deletions, clear the derivative cache, propagate validity over the dirty
/// seeds, push the composite to the undo history. Nested `begin`s share the
/// outermost transaction's composite and commit once.
pub struct Session {
    lock: ReentrantRwLock,
    domains: DomainLedger,
    doc: RwLock<DocState>,
    txn: Mutex<TxnState>,
    history: Mutex<UndoRedoManager>,
    catalog: Box<dyn TemplateCatalog + Send + Sync>,
    policy: Box<dyn ValidityPolicy + Send + Sync>,
    on_invalid_added: Mutex<Callbacks<NodeId>>,
    on_invalid_removed: Mutex<Callbacks<NodeId>>,
}

impl Session {
    /// Create a session over an empty document.
    pub fn new(
        catalog: Box<dyn TemplateCatalog + Send + Sync>,
        policy: Box<dyn ValidityPolicy + Send + Sync>,
        config: SessionConfig,
    ) -> Self {
        Self {
            lock: ReentrantRwLock::new(),
            domains: DomainLedger::new(),
            doc: RwLock::new(DocState {
                graph: Graph::new(),
                cache: DerivativeCache::new(),
            }),
            txn: Mutex::new(TxnState::default()),
            history: Mutex::new(UndoRedoManager::new(config.undo_limit)),
            catalog,
            policy,
            on_invalid_added: Mutex::new(Callbacks::new()),
            on_invalid_removed: Mutex::new(Callbacks::new()),
        }
    }

    // ==================== Transactions ====================

    /// Start (or nest into) a transaction holding the given exclusion
    /// domains.
    ///
    /// Returns `None` without side effects if any domain is held by another
    /// in-flight transaction; a nested `begin` may name domains the gesture
    /// already holds. Otherwise blocks until the write lock is available. A
    /// fresh composite is allocated only on the outermost `begin`.
    pub fn begin(&self, domains: &[DomainId]) -> Option<Context> {
        if !self.domains.claim(domains) {
            return None;
        }
        self.lock.lock_write();
        let mut txn = self.txn.lock();
        txn.nesting += 1;
        if txn.nesting == 1 {
            txn.active = Some(UserOp::new());
        }
        debug!(nesting = txn.nesting, ?domains, "begin");
        Some(Context {
            domains: domains.to_vec(),
        })
    }

    /// End a transaction. The outermost `end` runs the commit pipeline and
    /// records the edit in the undo history.
    ///
    /// Panics if no transaction is active.
    pub fn end(&self, ctx: Context) -> TxnResult<()> {
        self.finish(ctx, true)
    }

    /// End a transaction, running the commit pipeline but dropping the
    /// composite instead of recording it. Used by bulk loaders whose effect
    /// must not be undoable.
    pub fn end_discarding(&self, ctx: Context) -> TxnResult<()> {
        self.finish(ctx, false)
    }

    fn finish(&self, ctx: Context, record: bool) -> TxnResult<()> {
        self.domains.release(&ctx.domains);
        let mut txn = self.txn.lock();
        assert!(txn.nesting > 0, "end without a matching begin");
        txn.nesting -= 1;
        let outermost = txn.nesting == 0;
        debug!(nesting = txn.nesting, "end");
        let result = if outermost {
            let op = txn
                .active
                .take()
                .expect("outermost transaction owns a composite");
            drop(txn);
            self.commit(op, record)
        } else {
            Ok(())
        };
        self.lock.unlock_write();
        result
    }

    /// The commit pipeline for the outermost `end`.
    fn commit(&self, mut op: UserOp, record: bool) -> TxnResult<()> {
        let (purged_invalid, lint) = {
            let mut doc = self.doc.write();
            let DocState { graph, cache } = &mut *doc;
            let purge = Mutator::new(graph, cache, self.catalog.as_ref(), &mut op)
                .purge_delayed()?;
            cache.clear_all();
            let lint = ErrorChecker::new(self.policy.as_ref()).check(graph, &mut op)?;
            (purge.invalid, lint)
        };
        debug!(
            entries = op.len(),
            invalid_added = lint.added.len(),
            invalid_removed = lint.removed.len() + purged_invalid.len(),
            record,
            "commit"
        );
        {
            let added = self.on_invalid_added.lock();
            for node in &lint.added {
                added.emit(node);
            }
        }
        {
            let removed = self.on_invalid_removed.lock();
            for node in purged_invalid.iter().chain(&lint.removed) {
                removed.emit(node);
            }
        }
        if record {
            self.history.lock().push(op);
        }
        Ok(())
    }

    /// Run logged mutations inside an active transaction.
    ///
    /// Panics if called outside a `begin`/`end` pair.
    pub fn mutate<R>(&self, _ctx: &Context, f: impl FnOnce(&mut Mutator<'_>) -> R) -> R {
        let mut txn = self.txn.lock();
        assert!(txn.nesting > 0, "mutate outside an active transaction");
        let mut op = txn
            .active
            .take()
            .expect("active transaction owns a composite");
        drop(txn);
        let result = {
            let mut doc = self.doc.write();
            let DocState { graph, cache } = &mut *doc;
            let mut mutator = Mutator::new(graph, cache, self.catalog.as_ref(), &mut op);
            f(&mut mutator)
        };
        self.txn.lock().active = Some(op);
        result
    }

    // ==================== Readers ====================

    /// Enter a read gesture. Blocks while a writer is active; reads nest.
    pub fn begin_read(&self) {
        self.lock.lock_read();
    }

    /// Leave a read gesture.
    pub fn end_read(&self) {
        self.lock.unlock_read();
    }

    /// Run a pure observer over the graph inside its own read gesture.
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        self.lock.lock_read();
        let result = f(&self.doc.read().graph);
        self.lock.unlock_read();
        result
    }

    // ==================== History ====================

    /// Undo the most recent committed edit. Returns false when the undo
    /// stack is empty.
    ///
    /// Invalid-set changes caused by the replayed compensations fire the
    /// same notifications a commit would.
    pub fn undo(&self) -> TxnResult<bool> {
        self.lock.lock_write();
        let result = (|| {
            let mut doc = self.doc.write();
            let before = doc.graph.invalid_nodes().clone();
            let done = self.history.lock().undo(&mut doc.graph)?;
            doc.cache.clear_all();
            let after = doc.graph.invalid_nodes().clone();
            drop(doc);
            self.notify_invalid_diff(&before, &after);
            Ok(done)
        })();
        self.lock.unlock_write();
        result
    }

    /// Redo the most recently undone edit. Returns false when the redo
    /// stack is empty.
    ///
    /// Invalid-set changes caused by the replayed compensations fire the
    /// same notifications a commit would.
    pub fn redo(&self) -> TxnResult<bool> {
        self.lock.lock_write();
        let result = (|| {
            let mut doc = self.doc.write();
            let before = doc.graph.invalid_nodes().clone();
            let done = self.history.lock().redo(&mut doc.graph)?;
            doc.cache.clear_all();
            let after = doc.graph.invalid_nodes().clone();
            drop(doc);
            self.notify_invalid_diff(&before, &after);
            Ok(done)
        })();
        self.lock.unlock_write();
        result
    }

    /// Emit invalid-added/removed notifications for the difference between
    /// two invalid-set states.
    fn notify_invalid_diff(&self, before: &HashSet<NodeId>, after: &HashSet<NodeId>) {
        {
            let added = self.on_invalid_added.lock();
            for node in after.difference(before) {
                added.emit(node);
            }
        }
        let removed = self.on_invalid_removed.lock();
        for node in before.difference(after) {
            removed.emit(node);
        }
    }

    /// Edits available to undo.
    pub fn undo_count(&self) -> usize {
        self.history.lock().undo_count()
    }

    /// Edits available to redo.
    pub fn redo_count(&self) -> usize {
        self.history.lock().redo_count()
    }

    /// Drop both history stacks.
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Returns true if the document changed since it was last marked clean.
    pub fn is_dirty(&self) -> bool {
        self.history.lock().is_dirty()
    }

    /// Mark the document clean (saved).
    pub fn mark_clean(&self) {
        self.history.lock().mark_clean();
    }

    // ==================== Subscriptions ====================

    /// Subscribe to nodes becoming invalid.
    pub fn subscribe_invalid_added(
        &self,
        callback: impl Fn(&NodeId) + Send + 'static,
    ) -> Subscription {
        self.on_invalid_added.lock().subscribe(callback)
    }

    /// Subscribe to nodes becoming valid again (or leaving the document).
    pub fn subscribe_invalid_removed(
        &self,
        callback: impl Fn(&NodeId) + Send + 'static,
    ) -> Subscription {
        self.on_invalid_removed.lock().subscribe(callback)
    }

    /// Subscribe to undo/redo stack changes.
    pub fn subscribe_undo_changed(
        &self,
        callback: impl Fn(&UndoStackEvent) + Send + 'static,
    ) -> Subscription {
        self.history.lock().subscribe_changed(callback)
    }

    /// Remove an invalid-added subscription.
    pub fn unsubscribe_invalid_added(&self, subscription: Subscription) -> bool {
        self.on_invalid_added.lock().unsubscribe(subscription)
    }

    /// Remove an invalid-removed subscription.
    pub fn unsubscribe_invalid_removed(&self, subscription: Subscription) -> bool {
        self.on_invalid_removed.lock().unsubscribe(subscription)
    }

    /// Remove an undo-stack subscription.
    pub fn unsubscribe_undo_changed(&self, subscription: Subscription) -> bool {
        self.history.lock().unsubscribe_changed(subscription)
    }
}
