//! Strata - resource model transformation for institutional repositories
//!
//! Strata turns legacy repository objects into normalized `Resource`s and
//! persists them through a pluggable storage backend. A `SchemaDescriptor`
//! per legacy model drives the transformation; configuration picks the
//! backend and identifier minter at startup.
//!
//! ```no_run
//! use strata::{LegacyRecord, Runtime, StrataConfig};
//!
//! let config = StrataConfig::load_or_default(None).with_env_overrides();
//! let runtime = Runtime::from_config(&config)?;
//! let migrated = runtime
//!     .migration()
//!     .migrate(&LegacyRecord::new("GenericWork").with_value("title", "Moomin Valley"))?;
//! println!("{}", migrated.resource.alternate_id);
//! # Ok::<(), strata::StrataError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runtime;

// Re-exports for convenience
pub use application::{
    fixity_check_everything, BatchSweep, Migration, NestedCollectionQuery, ResourceCursor,
    RestrictionService, SaveError, SaveResource, StorageFacade, SweepSummary,
};
pub use config::{BackendKind, ConfigWarning, MinterKind, StrataConfig};
pub use domain::entities::{
    Embargo, Lease, LegacyRecord, Reference, Resource, ResourceKind, StoredRecord,
};
pub use domain::ports::{
    AccessPolicy, FixityCheck, IdentifierMinter, LegacyObject, ModelFilter, ScanPage,
    StorageBackend, StorageError, StorageResult,
};
pub use domain::schema::{SchemaDescriptor, SchemaRegistry};
pub use domain::services::{ModelTransformer, NestingRules, TransformError, Transformation};
pub use domain::value_objects::{AttributeValue, Identifier, Literal, Visibility};
pub use error::{StrataError, StrataResult};
pub use infrastructure::{DiskBackend, MemoryBackend, SequenceMinter, TripleBackend, UuidMinter};
pub use runtime::Runtime;
