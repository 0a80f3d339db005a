//! Infrastructure Layer
//!
//! Concrete implementations of domain ports. All I/O lives here.
//!
//! ## Structure
//!
//! - `storage/` - Storage backends (memory, disk, triple store)
//! - `minters/` - Identifier minters (UUID, prefixed sequence)

pub mod minters;
pub mod storage;

pub use minters::{SequenceMinter, UuidMinter};
pub use storage::{DiskBackend, MemoryBackend, TripleBackend};
