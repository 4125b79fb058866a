//! Raw reentrant read/write lock for gesture scoping.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
struct LockState {
    /// Per-thread read depth.
    readers: HashMap<ThreadId, usize>,
    /// Writing thread and its reentry depth.
    writer: Option<(ThreadId, usize)>,
}

/// A raw read/write lock with writer reentrancy and recursive reads.
///
/// Unlike the std and `parking_lot` RwLocks this lock is not a guard-based
/// data lock: it hands out no references and exists purely to scope
/// gestures, with explicit `lock_*`/`unlock_*` pairs the [`crate::Session`]
/// keeps balanced. The writing thread may re-enter `lock_write` and may take
/// read locks; upgrading a read lock to a write lock is not supported and
/// panics rather than deadlocking.
#[derive(Debug, Default)]
pub struct ReentrantRwLock {
    state: Mutex<LockState>,
    cond: Condvar,
}

impl ReentrantRwLock {
    /// Create an unlocked lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a read lock, blocking while another thread writes. Reads
    /// nest per thread, and the writing thread may read.
    pub fn lock_read(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        while matches!(state.writer, Some((owner, _)) if owner != me) {
            self.cond.wait(&mut state);
        }
        *state.readers.entry(me).or_insert(0) += 1;
    }

    /// Release one read acquisition.
    ///
    /// Panics if the calling thread holds no read lock.
    pub fn unlock_read(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        let depth = state
            .readers
            .get_mut(&me)
            .unwrap_or_else(|| panic!("unlock_read without a matching lock_read"));
        *depth -= 1;
        if *depth == 0 {
            state.readers.remove(&me);
            self.cond.notify_all();
        }
    }

    /// Acquire the write lock, blocking until all other readers and any
    /// other writer are gone. Re-entrant for the owning thread.
    ///
    /// Panics if the calling thread holds a read lock (upgrade unsupported).
    pub fn lock_write(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if let Some((owner, depth)) = &mut state.writer {
            if *owner == me {
                *depth += 1;
                return;
            }
        }
        if state.readers.contains_key(&me) {
            panic!("read lock held; read-to-write upgrade is not supported");
        }
        while state.writer.is_some() || !state.readers.is_empty() {
            self.cond.wait(&mut state);
        }
        state.writer = Some((me, 1));
    }

    /// Release one write acquisition.
    ///
    /// Panics if the calling thread does not hold the write lock.
    pub fn unlock_write(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        match &mut state.writer {
            Some((owner, depth)) if *owner == me => {
                *depth -= 1;
                if *depth == 0 {
                    state.writer = None;
                    self.cond.notify_all();
                }
            }
            _ => panic!("unlock_write without a matching lock_write"),
        }
    }
}
