//! Shared fixtures for Warren integration scenarios.

pub mod catalog;
pub mod policy;
pub mod snapshot;

pub mod prelude {
    pub use crate::catalog::TestCatalog;
    pub use crate::policy::{BrokenAttrPolicy, CountingPolicy};
    pub use crate::snapshot::{snapshot, GraphSnapshot};
    pub use crate::session_with;
    pub use warren_core::{attrs, DomainId, KindId, NodeId, SlotTag, Value};
    pub use warren_graph::Graph;
    pub use warren_txn::{Session, SessionConfig};
}

use crate::catalog::TestCatalog;
use crate::policy::BrokenAttrPolicy;
use warren_txn::{Session, SessionConfig};

/// A session over an empty document with the given catalog, the standard
/// broken-attribute policy, and default configuration.
pub fn session_with(catalog: TestCatalog) -> Session {
    Session::new(
        Box::new(catalog),
        Box::new(BrokenAttrPolicy),
        SessionConfig::default(),
    )
}
