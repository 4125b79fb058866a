//! Warren Linter
//!
//! Seed-driven validity propagation. Structural mutations record the nodes
//! they touch as dirty seeds in the graph; at commit the [`ErrorChecker`]
//! expands those seeds to their transitive closure over parent, children,
//! original and derivative edges, re-evaluates the host's [`ValidityPolicy`]
//! for every node in the closure, and updates the graph's invalid-node index
//! with compensations for each actual transition.

mod checker;
mod error;
mod policy;

pub use checker::{ErrorChecker, LintOutcome};
pub use error::{LintError, LintResult};
pub use policy::ValidityPolicy;
