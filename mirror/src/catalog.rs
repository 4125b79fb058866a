//! Template lookup seam.

use warren_core::{Attributes, KindId, SlotTag};

/// A recipe for instantiating a fresh derivative node.
#[derive(Debug, Clone)]
pub struct Template {
    /// Kind of the instantiated node.
    pub kind: KindId,
    /// Initial attributes of the instantiated node.
    pub attributes: Attributes,
}

/// Lookup into the node-definition layer.
///
/// The engine never owns node definitions; the sync pass asks this trait
/// whether a node of `kind`, landing in a mirrored slot tagged `slot`, has a
/// registered derivative form. `None` means the occupant of that slot in
/// each derivative is removed instead of replaced.
pub trait TemplateCatalog {
    /// The derivative template for nodes of `kind` under slot `slot`.
    fn template_for(&self, kind: KindId, slot: SlotTag) -> Option<Template>;
}
