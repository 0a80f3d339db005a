//! Save step and migration
//!
//! `SaveResource` validates a resource against its schema descriptor and
//! persists it. `Migration` runs a legacy object through the transformer and
//! then the save step.

use tracing::{debug, info};

use super::storage_facade::StorageFacade;
use crate::domain::entities::Resource;
use crate::domain::ports::{LegacyObject, StorageError};
use crate::domain::schema::SchemaRegistry;
use crate::domain::services::{ModelTransformer, Transformation};
use crate::domain::value_objects::Identifier;
use crate::error::StrataResult;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("{model} '{alternate_id}' is missing required properties: {}", missing.join(", "))]
    Invalid {
        alternate_id: Identifier,
        model: String,
        missing: Vec<String>,
    },

    #[error("no schema descriptor registered for model '{model}'")]
    UnregisteredModel { model: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct SaveResource<'a> {
    registry: &'a SchemaRegistry,
    facade: &'a StorageFacade,
}

impl<'a> SaveResource<'a> {
    pub fn new(registry: &'a SchemaRegistry, facade: &'a StorageFacade) -> Self {
        Self { registry, facade }
    }

    /// Check every required property is present and non-empty
    pub fn validate(&self, resource: &Resource) -> Result<(), SaveError> {
        let descriptor =
            self.registry
                .get(&resource.model)
                .ok_or_else(|| SaveError::UnregisteredModel {
                    model: resource.model.clone(),
                })?;

        let missing: Vec<String> = descriptor
            .required_properties()
            .filter(|decl| resource.attribute(&decl.name).map_or(true, |v| v.is_empty()))
            .map(|decl| decl.name.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SaveError::Invalid {
                alternate_id: resource.alternate_id.clone(),
                model: resource.model.clone(),
                missing,
            })
        }
    }

    /// Validate, then persist
    pub fn save(&self, resource: Resource) -> Result<Resource, SaveError> {
        self.validate(&resource)?;
        let saved = self.facade.persist(resource)?;
        debug!(alternate_id = %saved.alternate_id, model = %saved.model, "saved resource");
        Ok(saved)
    }
}

pub struct Migration<'a> {
    transformer: ModelTransformer<'a>,
    saver: SaveResource<'a>,
}

impl<'a> Migration<'a> {
    pub fn new(transformer: ModelTransformer<'a>, saver: SaveResource<'a>) -> Self {
        Self { transformer, saver }
    }

    /// Transform a legacy object and save the result
    ///
    /// The returned transformation holds the persisted resource and any
    /// references skipped while resolving relationships.
    pub fn migrate<O: LegacyObject + ?Sized>(&self, object: &O) -> StrataResult<Transformation> {
        let Transformation { resource, warnings } = self.transformer.transform(object)?;
        let resource = self.saver.save(resource)?;
        info!(
            alternate_id = %resource.alternate_id,
            model = %resource.model,
            skipped_references = warnings.len(),
            "migrated resource"
        );
        Ok(Transformation { resource, warnings })
    }
}
