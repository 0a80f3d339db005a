//! Domain Layer
//!
//! The transformation core, free of I/O.
//!
//! ## Structure
//!
//! - `entities/` - Resource, embargo/lease, legacy snapshots, stored records
//! - `value_objects/` - Identifier, literals, visibility, permissions
//! - `schema/` - Schema descriptors and the registry that holds them
//! - `services/` - Mapper, resolver, allocator, transformer, rule evaluator
//! - `ports/` - Interfaces implemented by infrastructure or the host
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Storage and minting go through ports
//! 2. **Descriptor-driven** - Properties are enumerated from schema descriptors
//! 3. **Pure services** - Transformation is a function of the legacy snapshot

pub mod entities;
pub mod ports;
pub mod schema;
pub mod services;
pub mod value_objects;
