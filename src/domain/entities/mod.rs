//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Resource` - the normalized repository object
//! - `Embargo` / `Lease` - time-bound restrictions owned by a resource
//! - `LegacyRecord` - snapshot of a pre-migration object
//! - `StoredRecord` - what storage backends persist

mod legacy;
mod record;
mod resource;
mod restriction;

pub use legacy::{
    FileRole, LegacyFile, LegacyLink, LegacyRecord, LegacyRelation, LegacyRestriction, LegacyTerm,
    LinkRole,
};
pub use record::{ResourceRecord, StoredRecord};
pub use resource::{Reference, Resource, ResourceKind};
pub use restriction::{Embargo, Lease, TimeBound};
