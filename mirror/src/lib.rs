//! Warren Mirror
//!
//! The derivative registry: a per-transaction cache mapping each ultimate
//! original to the full set of nodes mirroring it, and the [`TemplateCatalog`]
//! seam through which the node-definition layer tells the sync pass what a
//! derivative of a given kind looks like.
//!
//! The cache is a memoization over the graph's derivative edges, valid only
//! within a single transaction; the coordinator clears it at every commit.

mod cache;
mod catalog;

pub use cache::DerivativeCache;
pub use catalog::{Template, TemplateCatalog};
