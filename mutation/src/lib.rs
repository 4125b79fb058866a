//! Warren Mutation
//!
//! The logged mutation layer. Every primitive here performs a graph change
//! and pushes its compensation onto the transaction's `UserOp`; slot changes
//! on mirrored nodes additionally fan out to derivatives through the sync
//! pass.
//!
//! The [`Mutator`] delegates to specialized operation modules in `ops/`:
//! - `ops/lifecycle.rs` - node creation, recursive deletion, commit purge
//! - `ops/structure.rs` - slot assignment, roots, derivative links
//! - `ops/attrs.rs`     - attributes and auxiliary flags
//! - `ops/sync.rs`      - derivative fan-out for changed slots

mod error;
mod mutator;
mod ops;
mod result;

pub use error::{MutationError, MutationResult};
pub use mutator::Mutator;
pub use result::PurgeOutcome;
