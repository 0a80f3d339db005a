//! Storage backends
//!
//! Interchangeable implementations of the `StorageBackend` port. Exactly one
//! is active per runtime, chosen from configuration.

mod disk;
mod memory;
mod triple;

pub use disk::DiskBackend;
pub use memory::MemoryBackend;
pub use triple::{Term, Triple, TripleBackend};
