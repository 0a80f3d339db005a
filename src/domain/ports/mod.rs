//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides storage backends and minters; legacy objects,
//! authorization and fixity checks are supplied by the host.

pub mod access_policy;
pub mod fixity_check;
pub mod identifier_minter;
pub mod legacy_object;
pub mod storage_backend;

pub use access_policy::{Access, AccessPolicy, AllowAll};
pub use fixity_check::FixityCheck;
pub use identifier_minter::{IdentifierMinter, MintError};
pub use legacy_object::LegacyObject;
pub use storage_backend::{ModelFilter, ScanPage, StorageBackend, StorageError, StorageResult};
