//! Map-backed template catalog for scenarios.

use std::collections::HashMap;
use warren_core::{Attributes, KindId, SlotTag};
use warren_mirror::{Template, TemplateCatalog};

/// A template catalog built from explicit (kind, slot) registrations.
#[derive(Debug, Default)]
pub struct TestCatalog {
    templates: HashMap<(KindId, SlotTag), Template>,
}

impl TestCatalog {
    /// An empty catalog: every sync removes instead of replacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a derivative template for originals of `kind` under `slot`.
    pub fn with(mut self, kind: KindId, slot: SlotTag, template_kind: KindId) -> Self {
        self.templates.insert(
            (kind, slot),
            Template {
                kind: template_kind,
                attributes: Attributes::new(),
            },
        );
        self
    }
}

impl TemplateCatalog for TestCatalog {
    fn template_for(&self, kind: KindId, slot: SlotTag) -> Option<Template> {
        self.templates.get(&(kind, slot)).cloned()
    }
}
