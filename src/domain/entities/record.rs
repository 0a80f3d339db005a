//! Stored record - the shape every storage backend reads and writes
//!
//! A persisted resource is split into one `ResourceRecord` plus one record
//! per embedded embargo or lease. The resource record holds only the child
//! identifiers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Embargo, Lease, Reference, Resource, ResourceKind};
use crate::domain::value_objects::{AttributeValue, Identifier, Permissions};

/// Persisted form of a resource, without embedded restrictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: Identifier,
    pub alternate_id: Identifier,
    pub model: String,
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub members_ordered: bool,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub member_of_collection_ids: BTreeSet<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub original_file_ids: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnail_ids: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extracted_text_ids: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_set_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Reference>,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_id: Option<Identifier>,
}

/// Helper for serde skip_serializing_if
fn is_false(b: &bool) -> bool {
    !*b
}

impl ResourceRecord {
    /// Split a resource into its record and embedded restrictions
    ///
    /// Restrictions must already carry their identifiers; the record
    /// references them by id.
    pub fn split(resource: Resource, id: Identifier) -> (Self, Option<Embargo>, Option<Lease>) {
        let Resource {
            id: _,
            alternate_id,
            model,
            kind,
            attributes,
            member_ids,
            members_ordered,
            member_of_collection_ids,
            file_ids,
            original_file_ids,
            thumbnail_ids,
            extracted_text_ids,
            representative_id,
            thumbnail_id,
            access_control_id,
            admin_set_id,
            relationships,
            permissions,
            embargo,
            lease,
        } = resource;

        let record = Self {
            id,
            alternate_id,
            model,
            kind,
            attributes,
            member_ids,
            members_ordered,
            member_of_collection_ids,
            file_ids,
            original_file_ids,
            thumbnail_ids,
            extracted_text_ids,
            representative_id,
            thumbnail_id,
            access_control_id,
            admin_set_id,
            relationships,
            permissions,
            embargo_id: embargo.as_ref().and_then(|e| e.id.clone()),
            lease_id: lease.as_ref().and_then(|l| l.id.clone()),
        };
        (record, embargo, lease)
    }

    /// Rebuild a resource from its record and the referenced restrictions
    pub fn into_resource(self, embargo: Option<Embargo>, lease: Option<Lease>) -> Resource {
        let mut resource = Resource::new(self.alternate_id, self.model, self.kind);
        resource.id = Some(self.id);
        resource.attributes = self.attributes;
        resource.member_ids = self.member_ids;
        resource.members_ordered = self.members_ordered;
        resource.member_of_collection_ids = self.member_of_collection_ids;
        resource.file_ids = self.file_ids;
        resource.original_file_ids = self.original_file_ids;
        resource.thumbnail_ids = self.thumbnail_ids;
        resource.extracted_text_ids = self.extracted_text_ids;
        resource.representative_id = self.representative_id;
        resource.thumbnail_id = self.thumbnail_id;
        resource.access_control_id = self.access_control_id;
        resource.admin_set_id = self.admin_set_id;
        resource.relationships = self.relationships;
        resource.permissions = self.permissions;
        resource.embargo = embargo;
        resource.lease = lease;
        resource
    }
}

/// Any record a storage backend holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum StoredRecord {
    Resource(ResourceRecord),
    Embargo(Embargo),
    Lease(Lease),
}

impl StoredRecord {
    /// Storage key; restriction records without an id cannot be stored
    pub fn id(&self) -> Option<&Identifier> {
        match self {
            StoredRecord::Resource(r) => Some(&r.id),
            StoredRecord::Embargo(e) => e.id.as_ref(),
            StoredRecord::Lease(l) => l.id.as_ref(),
        }
    }

    /// Alternate identifier, for resource records only
    pub fn alternate_id(&self) -> Option<&Identifier> {
        match self {
            StoredRecord::Resource(r) => Some(&r.alternate_id),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceRecord> {
        match self {
            StoredRecord::Resource(r) => Some(r),
            _ => None,
        }
    }
}
