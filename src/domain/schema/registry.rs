//! Schema registry - descriptors keyed by legacy model name
//!
//! Built once at configuration time and shared read-only afterwards.

use std::collections::BTreeMap;

use super::{PropertyDecl, SchemaDescriptor};
use crate::domain::entities::ResourceKind;
use crate::domain::value_objects::ValueKind;

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    descriptors: BTreeMap<String, SchemaDescriptor>,
}

impl SchemaRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in repository models
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for descriptor in default_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one for the same model
    pub fn register(&mut self, descriptor: SchemaDescriptor) -> Option<SchemaDescriptor> {
        self.descriptors.insert(descriptor.model.clone(), descriptor)
    }

    pub fn get(&self, model: &str) -> Option<&SchemaDescriptor> {
        self.descriptors.get(model)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.descriptors.contains_key(model)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Shared descriptive metadata
fn core_metadata(descriptor: SchemaDescriptor, title: PropertyDecl) -> SchemaDescriptor {
    descriptor
        .property(title)
        .property(PropertyDecl::single("depositor").of(ValueKind::String))
        .property(PropertyDecl::many("creator"))
        .property(PropertyDecl::many("contributor"))
        .property(PropertyDecl::many("description"))
        .property(PropertyDecl::many("keyword"))
        .property(PropertyDecl::many("subject"))
        .property(PropertyDecl::many("language"))
        .property(PropertyDecl::many("publisher"))
        .property(PropertyDecl::many("source"))
        .property(PropertyDecl::many("license"))
        .property(PropertyDecl::many("rights_statement"))
        .property(PropertyDecl::many("identifier"))
        .property(PropertyDecl::many("date_created").of(ValueKind::Timestamp))
        .property(PropertyDecl::many("related_url").of(ValueKind::Uri))
        .property(PropertyDecl::single("import_url").of(ValueKind::Uri))
        .property(PropertyDecl::single("date_uploaded").of(ValueKind::Timestamp))
        .property(PropertyDecl::single("date_modified").of(ValueKind::Timestamp))
}

fn default_descriptors() -> Vec<SchemaDescriptor> {
    vec![
        core_metadata(
            SchemaDescriptor::new("GenericWork", ResourceKind::Work),
            PropertyDecl::many("title").required(),
        ),
        core_metadata(
            SchemaDescriptor::new("FileSet", ResourceKind::FileSet),
            PropertyDecl::many("title"),
        )
        .property(PropertyDecl::single("label").of(ValueKind::String)),
        core_metadata(
            SchemaDescriptor::new("Collection", ResourceKind::Collection),
            PropertyDecl::many("title").required(),
        )
        .property(PropertyDecl::single("collection_type_gid").of(ValueKind::String)),
        SchemaDescriptor::new("AdminSet", ResourceKind::AdminSet)
            .property(PropertyDecl::many("title").required())
            .property(PropertyDecl::many("description"))
            .property(PropertyDecl::single("creator")),
    ]
}
