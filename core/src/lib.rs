//! Warren Core Types
//!
//! This crate provides the foundational types used throughout the engine:
//! - Identity types (NodeId, KindId, SlotTag, DomainId)
//! - Value types (the Value enum stored in node attributes)
//! - Typed callback registries (Callbacks, Subscription)

mod event;
mod id;
mod value;

pub use event::*;
pub use id::*;
pub use value::*;

/// Default bound on the undo stack.
pub const DEFAULT_UNDO_LIMIT: usize = 128;
