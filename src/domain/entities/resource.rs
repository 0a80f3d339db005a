//! Resource entity - the normalized, storage-agnostic unit of persistence
//!
//! Resources are produced by the model transformer and persisted through the
//! storage facade. Fields are public so callers can edit a resource before
//! persisting it; construction outside the crate goes through the
//! transformer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Embargo, Lease};
use crate::domain::value_objects::{AttributeValue, Identifier, Literal, Permissions};

/// Closed set of resource variants a schema descriptor can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    Work,
    FileSet,
    Collection,
    AdminSet,
}

impl ResourceKind {
    /// Kinds that may hold members
    pub fn has_members(&self) -> bool {
        !matches!(self, ResourceKind::FileSet)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Work => write!(f, "work"),
            ResourceKind::FileSet => write!(f, "file_set"),
            ResourceKind::Collection => write!(f, "collection"),
            ResourceKind::AdminSet => write!(f, "admin_set"),
        }
    }
}

/// A resolved relationship reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    One(Identifier),
    Many(Vec<Identifier>),
}

impl Reference {
    pub fn ids(&self) -> &[Identifier] {
        match self {
            Reference::One(id) => std::slice::from_ref(id),
            Reference::Many(ids) => ids,
        }
    }
}

/// Normalized repository resource
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Resource {
    /// Internal storage key, assigned on first persist
    pub id: Option<Identifier>,
    /// Stable external identifier, never reassigned
    pub alternate_id: Identifier,
    /// Legacy model name this resource was transformed from
    pub model: String,
    pub kind: ResourceKind,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub member_ids: Vec<Identifier>,
    /// Whether `member_ids` order came from an order-preserving source
    pub members_ordered: bool,
    pub member_of_collection_ids: BTreeSet<Identifier>,
    pub file_ids: Vec<Identifier>,
    pub original_file_ids: Vec<Identifier>,
    pub thumbnail_ids: Vec<Identifier>,
    pub extracted_text_ids: Vec<Identifier>,
    pub representative_id: Option<Identifier>,
    pub thumbnail_id: Option<Identifier>,
    pub access_control_id: Option<Identifier>,
    pub admin_set_id: Option<Identifier>,
    /// Declared relationships keyed by field name (e.g. `page_ids`)
    pub relationships: BTreeMap<String, Reference>,
    pub permissions: Permissions,
    pub embargo: Option<Embargo>,
    pub lease: Option<Lease>,
}

impl Resource {
    pub(crate) fn new(alternate_id: Identifier, model: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: None,
            alternate_id,
            model: model.into(),
            kind,
            attributes: BTreeMap::new(),
            member_ids: Vec::new(),
            members_ordered: false,
            member_of_collection_ids: BTreeSet::new(),
            file_ids: Vec::new(),
            original_file_ids: Vec::new(),
            thumbnail_ids: Vec::new(),
            extracted_text_ids: Vec::new(),
            representative_id: None,
            thumbnail_id: None,
            access_control_id: None,
            admin_set_id: None,
            relationships: BTreeMap::new(),
            permissions: Permissions::default(),
            embargo: None,
            lease: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Values of an attribute in order; empty when unset
    pub fn values(&self, name: &str) -> &[Literal] {
        self.attributes
            .get(name)
            .map(AttributeValue::values)
            .unwrap_or(&[])
    }

    /// First string-like value of an attribute
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.values(name).first().and_then(Literal::as_text)
    }

    pub fn title(&self) -> Option<&str> {
        self.first_text("title")
    }

    pub fn relationship(&self, field: &str) -> Option<&Reference> {
        self.relationships.get(field)
    }

    /// Field-for-field equality ignoring identifiers assigned by storage
    ///
    /// Compares everything except `id` and the `id` of embedded embargo and
    /// lease values.
    pub fn content_eq(&self, other: &Resource) -> bool {
        fn strip(r: &Resource) -> Resource {
            let mut r = r.clone();
            r.id = None;
            if let Some(e) = r.embargo.as_mut() {
                e.id = None;
            }
            if let Some(l) = r.lease.as_mut() {
                l.id = None;
            }
            r
        }
        strip(self) == strip(other)
    }
}
