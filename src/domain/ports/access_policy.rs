//! AccessPolicy port - the authorization collaborator
//!
//! Answers whether the current caller may perform an action on a resource.
//! Rules live outside this crate.

use crate::domain::entities::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Edit,
}

pub trait AccessPolicy {
    fn can(&self, access: Access, resource: &Resource) -> bool;
}

/// Grants everything; for administrative callers and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can(&self, _access: Access, _resource: &Resource) -> bool {
        true
    }
}
