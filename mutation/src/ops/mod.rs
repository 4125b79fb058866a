//! Specialized mutation operation modules.

mod attrs;
mod lifecycle;
mod structure;
mod sync;

pub(crate) use attrs::{set_attr, set_breakpoint, set_selected};
pub(crate) use lifecycle::{create_node, delete_node, purge_delayed};
pub(crate) use structure::{add_root, link_derivative, remove_root, set_child, unlink_derivative};
