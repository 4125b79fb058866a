//! Warren Txn
//!
//! The transaction coordinator. A [`Session`] wraps one document and
//! serializes every logical edit: `begin` claims exclusion domains and the
//! reentrant write lock, `mutate` runs logged primitives against the
//! document, and the matching outermost `end` drives the commit pipeline:
//! purge delayed deletions, clear the derivative cache, run the error
//! checker over the dirty seeds, hand the composite to the undo history.
//!
//! Concurrency is two-layered: the raw [`ReentrantRwLock`] scopes whole
//! gestures (many readers, one reentrant writer), while the document data
//! itself sits behind a `parking_lot::RwLock` for aliasing-safe access.

mod domains;
mod error;
mod lock;
mod session;

pub use domains::DomainLedger;
pub use error::{TxnError, TxnResult};
pub use lock::ReentrantRwLock;
pub use session::{Context, Session, SessionConfig};
