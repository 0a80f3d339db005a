//! Domain Services
//!
//! Pure transformation and classification logic. Nothing here performs I/O;
//! collaborators arrive through the ports.

mod attribute_mapper;
mod collection_nesting;
mod identity_allocator;
mod model_transformer;
mod relationship_resolver;
mod restriction_evaluator;

pub use attribute_mapper::{coerce, map_attributes, map_embargo, map_lease, MappingError};
pub use collection_nesting::{NestingRules, COLLECTION_TYPE};
pub use identity_allocator::{IdentityAllocationError, IdentityAllocator};
pub use model_transformer::{ModelTransformer, TransformError, Transformation};
pub use relationship_resolver::{
    resolve_relationships, ReferenceIssue, ReferenceResolutionError, ReferenceWarning,
    ResolvedRelationships,
};
pub use restriction_evaluator::{
    classify, classify_embargo, classify_lease, RestrictionClass, RestrictionStatus,
};
