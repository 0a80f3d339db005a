//! Collection nesting rules
//!
//! Collections of a nestable type may contain collections of the same type.
//! Whether a caller may nest a pair also depends on their access, which the
//! `AccessPolicy` port decides.

use std::collections::BTreeSet;

use crate::domain::entities::{Resource, ResourceKind};
use crate::domain::ports::{Access, AccessPolicy};

/// Attribute holding a collection's type identifier
pub const COLLECTION_TYPE: &str = "collection_type_gid";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingRules {
    nestable_types: BTreeSet<String>,
}

impl NestingRules {
    pub fn new<I, S>(nestable_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nestable_types: nestable_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn collection_type<'r>(&self, collection: &'r Resource) -> Option<&'r str> {
        collection.first_text(COLLECTION_TYPE)
    }

    /// A collection whose type allows nesting
    pub fn is_nestable(&self, resource: &Resource) -> bool {
        resource.kind == ResourceKind::Collection
            && self
                .collection_type(resource)
                .is_some_and(|t| self.nestable_types.contains(t))
    }

    pub fn parent_and_child_can_nest(
        &self,
        parent: &Resource,
        child: &Resource,
        policy: &dyn AccessPolicy,
    ) -> bool {
        parent.alternate_id != child.alternate_id
            && self.is_nestable(parent)
            && self.is_nestable(child)
            && self.collection_type(parent) == self.collection_type(child)
            && policy.can(Access::Edit, parent)
            && policy.can(Access::Read, child)
    }

    /// Collections that could be nested under `parent`
    pub fn child_candidates<I>(
        &self,
        parent: &Resource,
        policy: &dyn AccessPolicy,
        collections: I,
    ) -> Vec<Resource>
    where
        I: IntoIterator<Item = Resource>,
    {
        if !self.is_nestable(parent) || !policy.can(Access::Edit, parent) {
            return Vec::new();
        }
        collections
            .into_iter()
            .filter(|c| self.parent_and_child_can_nest(parent, c, policy))
            .collect()
    }

    /// Collections `child` could be nested under
    pub fn parent_candidates<I>(
        &self,
        child: &Resource,
        policy: &dyn AccessPolicy,
        collections: I,
    ) -> Vec<Resource>
    where
        I: IntoIterator<Item = Resource>,
    {
        if !self.is_nestable(child) || !policy.can(Access::Read, child) {
            return Vec::new();
        }
        collections
            .into_iter()
            .filter(|c| self.parent_and_child_can_nest(c, child, policy))
            .collect()
    }
}
