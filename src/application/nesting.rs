//! Nested collection queries against stored collections

use tracing::debug;

use super::storage_facade::StorageFacade;
use crate::domain::entities::{Resource, ResourceKind};
use crate::domain::ports::{AccessPolicy, ModelFilter, StorageResult};
use crate::domain::services::NestingRules;

pub struct NestedCollectionQuery<'a> {
    rules: &'a NestingRules,
    facade: &'a StorageFacade,
}

impl<'a> NestedCollectionQuery<'a> {
    pub fn new(rules: &'a NestingRules, facade: &'a StorageFacade) -> Self {
        Self { rules, facade }
    }

    pub fn parent_and_child_can_nest(
        &self,
        parent: &Resource,
        child: &Resource,
        policy: &dyn AccessPolicy,
    ) -> bool {
        self.rules.parent_and_child_can_nest(parent, child, policy)
    }

    /// Stored collections the caller could nest under `parent`
    pub fn available_child_collections(
        &self,
        parent: &Resource,
        policy: &dyn AccessPolicy,
    ) -> StorageResult<Vec<Resource>> {
        if !self.rules.is_nestable(parent) {
            return Ok(Vec::new());
        }
        let found = self
            .rules
            .child_candidates(parent, policy, self.collections()?);
        debug!(parent = %parent.alternate_id, found = found.len(), "child collection candidates");
        Ok(found)
    }

    /// Stored collections the caller could nest `child` under
    pub fn available_parent_collections(
        &self,
        child: &Resource,
        policy: &dyn AccessPolicy,
    ) -> StorageResult<Vec<Resource>> {
        if !self.rules.is_nestable(child) {
            return Ok(Vec::new());
        }
        let found = self
            .rules
            .parent_candidates(child, policy, self.collections()?);
        debug!(child = %child.alternate_id, found = found.len(), "parent collection candidates");
        Ok(found)
    }

    fn collections(&self) -> StorageResult<Vec<Resource>> {
        self.facade
            .find_all(ModelFilter::Kind(ResourceKind::Collection))
            .collect()
    }
}
