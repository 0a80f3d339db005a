//! Model transformer
//!
//! Composes the attribute mapper, relationship resolver and identity
//! allocator into one transformation from a legacy object to a `Resource`.
//! The identifier is allocated last so a failed transformation never
//! consumes a mint.

use tracing::debug;

use super::attribute_mapper::{map_attributes, map_embargo, map_lease, MappingError};
use super::identity_allocator::{IdentityAllocationError, IdentityAllocator};
use super::relationship_resolver::{resolve_relationships, ReferenceWarning};
use crate::domain::entities::{LinkRole, Resource};
use crate::domain::ports::{IdentifierMinter, LegacyObject};
use crate::domain::schema::SchemaRegistry;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("no schema descriptor registered for model '{model}'")]
    UnregisteredModel {
        model: String,
        source_id: Option<String>,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("cannot allocate an identifier for {model}: {source}")]
    Identity {
        model: String,
        #[source]
        source: IdentityAllocationError,
    },
}

/// A built resource and the references skipped while building it
#[derive(Debug, Clone)]
pub struct Transformation {
    pub resource: Resource,
    pub warnings: Vec<ReferenceWarning>,
}

pub struct ModelTransformer<'a> {
    registry: &'a SchemaRegistry,
    allocator: IdentityAllocator<'a>,
}

impl<'a> ModelTransformer<'a> {
    pub fn new(registry: &'a SchemaRegistry, minter: &'a dyn IdentifierMinter) -> Self {
        Self {
            registry,
            allocator: IdentityAllocator::new(minter),
        }
    }

    /// Transform and return only the resource
    pub fn build<O: LegacyObject + ?Sized>(&self, object: &O) -> Result<Resource, TransformError> {
        self.transform(object).map(|t| t.resource)
    }

    pub fn transform<O: LegacyObject + ?Sized>(
        &self,
        object: &O,
    ) -> Result<Transformation, TransformError> {
        let descriptor =
            self.registry
                .get(object.model())
                .ok_or_else(|| TransformError::UnregisteredModel {
                    model: object.model().to_string(),
                    source_id: object.identifier().map(str::to_string),
                })?;

        let attributes = map_attributes(object, descriptor)?;
        let embargo = map_embargo(object)?;
        let lease = map_lease(object)?;
        let mut resolved = resolve_relationships(object, descriptor);

        let alternate_id =
            self.allocator
                .allocate(object.identifier())
                .map_err(|source| TransformError::Identity {
                    model: object.model().to_string(),
                    source,
                })?;

        let mut resource = Resource::new(alternate_id, descriptor.model.clone(), descriptor.kind);
        resource.attributes = attributes;
        resource.member_ids = resolved.member_ids;
        resource.members_ordered = resolved.members_ordered;
        resource.member_of_collection_ids = resolved.member_of_collection_ids;
        resource.file_ids = resolved.file_ids;
        resource.original_file_ids = resolved.original_file_ids;
        resource.thumbnail_ids = resolved.thumbnail_ids;
        resource.extracted_text_ids = resolved.extracted_text_ids;
        resource.representative_id = resolved.links.remove(&LinkRole::Representative);
        resource.thumbnail_id = resolved.links.remove(&LinkRole::Thumbnail);
        resource.access_control_id = resolved.links.remove(&LinkRole::AccessControl);
        resource.admin_set_id = resolved.links.remove(&LinkRole::AdminSet);
        resource.relationships = resolved.relationships;
        resource.permissions = object.permissions().clone();
        resource.embargo = embargo;
        resource.lease = lease;

        debug!(
            alternate_id = %resource.alternate_id,
            model = %resource.model,
            warnings = resolved.warnings.len(),
            "transformed legacy object"
        );

        Ok(Transformation {
            resource,
            warnings: resolved.warnings,
        })
    }
}
