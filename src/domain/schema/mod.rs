//! Schema descriptors for legacy models
//!
//! Each legacy model registers a descriptor naming its properties and
//! relationships. Transformation dispatches on the descriptor's declared
//! `ResourceKind`.

mod descriptor;
mod registry;

pub use descriptor::{Cardinality, PropertyDecl, RelationshipDecl, SchemaDescriptor};
pub use registry::SchemaRegistry;
