//! Warren Operation Log
//!
//! Compensation records for undo. Every logged mutation primitive pushes one
//! [`Op`], a small tagged record naming its forward effect plus the data
//! needed to invert it, onto the transaction's [`UserOp`] composite. At
//! undo time the composite is consumed in LIFO order; each inversion applies
//! the inverse effect to the graph and emits the inverse-of-the-inverse, so
//! the returned composite is the redo entry.

mod composite;
mod op;

pub use composite::UserOp;
pub use op::Op;
