//! Application Layer
//!
//! Orchestration over the domain services and the active storage backend.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain transformation rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `StorageFacade` - Resource-level persistence and lazy paged reads
//! - `SaveResource` / `Migration` - Validate and persist transformed resources
//! - `BatchSweep` - Fault-tolerant walk over stored resources
//! - `fixity_check_everything` - Sweep every file set through a `FixityCheck`
//! - `RestrictionService` - Embargo and lease queries
//! - `NestedCollectionQuery` - Collection nesting candidates from storage

mod fixity;
mod migration;
mod nesting;
mod restrictions;
mod storage_facade;
mod sweep;

pub use fixity::fixity_check_everything;
pub use migration::{Migration, SaveError, SaveResource};
pub use nesting::NestedCollectionQuery;
pub use restrictions::RestrictionService;
pub use storage_facade::{ResourceCursor, StorageFacade, DEFAULT_PAGE_SIZE};
pub use sweep::{BatchSweep, SweepSummary};
