//! Exclusion domain bookkeeping.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::thread::{self, ThreadId};
use tracing::trace;
use warren_core::DomainId;

/// Tracks which exclusion domains are held, and by whom.
///
/// The holder of a domain is the thread that claimed it, which under the
/// gesture write lock identifies the in-flight transaction. Claiming is
/// all-or-nothing and never blocks: if any requested domain is held by a
/// different transaction, nothing is claimed and the caller backs off.
/// Re-claims by the holding transaction stack, so nested `begin`s may name
/// domains the gesture already holds; each release unwinds one claim. First
/// come, first served; retry policy belongs to the caller.
#[derive(Debug, Default)]
pub struct DomainLedger {
    held: Mutex<HashMap<DomainId, Hold>>,
}

#[derive(Debug)]
struct Hold {
    owner: ThreadId,
    depth: usize,
}

impl DomainLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim every domain in `domains`, or none of them. Returns false when
    /// any of them is held by another transaction.
    pub fn claim(&self, domains: &[DomainId]) -> bool {
        let me = thread::current().id();
        let mut held = self.held.lock();
        let conflict = domains
            .iter()
            .any(|d| held.get(d).is_some_and(|h| h.owner != me));
        if conflict {
            trace!(?domains, "domain conflict");
            return false;
        }
        for domain in domains {
            held.entry(*domain)
                .or_insert(Hold {
                    owner: me,
                    depth: 0,
                })
                .depth += 1;
        }
        true
    }

    /// Release previously claimed domains, one claim each.
    ///
    /// Panics if any of them is not held by the calling transaction; a
    /// release must match a claim.
    pub fn release(&self, domains: &[DomainId]) {
        let me = thread::current().id();
        let mut held = self.held.lock();
        for domain in domains {
            match held.get_mut(domain) {
                Some(hold) if hold.owner == me => {
                    hold.depth -= 1;
                    if hold.depth == 0 {
                        held.remove(domain);
                    }
                }
                _ => panic!("released domain {domain} was not held"),
            }
        }
    }

    /// Returns true if the domain is currently held by any transaction.
    pub fn is_held(&self, domain: DomainId) -> bool {
        self.held.lock().contains_key(&domain)
    }
}
