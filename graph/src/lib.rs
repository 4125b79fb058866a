//! Warren Graph
//!
//! The in-memory document model: an id-indexed node arena with parent/child
//! edges through named connector slots and original/derivative edges kept as
//! a reverse index. The graph also carries the transient per-transaction
//! state the rest of the engine drains at commit time: the dirty seed set,
//! the delayed-deletion set and the invalid-node index.
//!
//! All mutators here are low level and unlogged; compensations are pushed by
//! the `warren-mutation` primitives that wrap them.

mod error;
mod graph;
mod node;

pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use node::{Node, ParentLink};
