//! StorageBackend port - raw record persistence
//!
//! Backends store `StoredRecord`s keyed by internal identifier and index
//! resource records by alternate identifier. The storage facade builds the
//! resource-level contract on top of this port.

use std::path::PathBuf;

use crate::domain::entities::{ResourceKind, StoredRecord};
use crate::domain::value_objects::Identifier;

pub type StorageResult<T> = Result<T, StorageError>;

/// One page of a scan; every slot is decoded on its own
pub type ScanPage = Vec<StorageResult<StoredRecord>>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No record with this identifier (an expected outcome, not a failure)
    #[error("no resource found for identifier '{id}'")]
    NotFound { id: String },

    /// The backend refused the write
    #[error("{backend} backend rejected write of '{id}': {reason}")]
    Rejected {
        backend: &'static str,
        id: String,
        reason: String,
    },

    /// Stored data could not be decoded
    #[error("corrupt record at {location}: {message}")]
    Corrupt { location: String, message: String },

    #[error("failed to serialize record '{id}': {message}")]
    Serialization { id: String, message: String },

    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lock guarding backend state was poisoned by a panicking writer
    #[error("{backend} backend state is poisoned")]
    Poisoned { backend: &'static str },
}

impl StorageError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        StorageError::NotFound { id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Which resources a scan returns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelFilter {
    /// Every resource record
    #[default]
    All,
    /// Resources transformed from this legacy model
    Model(String),
    /// Resources of this kind
    Kind(ResourceKind),
}

impl ModelFilter {
    pub fn model(name: impl Into<String>) -> Self {
        ModelFilter::Model(name.into())
    }

    /// Whether a stored record passes the filter; restriction records never do
    pub fn matches(&self, record: &StoredRecord) -> bool {
        record
            .as_resource()
            .is_some_and(|r| self.matches_entry(r.kind, &r.model))
    }

    /// Whether a resource of `kind` transformed from `model` passes
    pub fn matches_entry(&self, kind: ResourceKind, model: &str) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Model(m) => m == model,
            ModelFilter::Kind(k) => *k == kind,
        }
    }
}

/// Abstract record store
///
/// Writes are atomic per record: a concurrent reader sees either the old or
/// the new record, never a mix. Concurrent writes to the same identifier are
/// last-write-wins.
pub trait StorageBackend: Send + Sync {
    /// Short backend name for logs and errors
    fn name(&self) -> &'static str;

    /// Insert or replace a record
    fn write(&self, record: StoredRecord) -> StorageResult<()>;

    /// Delete a record and its index entries; absent records are ignored
    fn remove(&self, id: &Identifier) -> StorageResult<()>;

    /// Read a record by internal identifier
    fn read(&self, id: &Identifier) -> StorageResult<Option<StoredRecord>>;

    /// Read a resource record by alternate identifier
    fn read_by_alternate(&self, alternate_id: &Identifier) -> StorageResult<Option<StoredRecord>>;

    /// Resource records matching `filter`, in a stable order, skipping
    /// `offset` matches and returning at most `limit`
    ///
    /// Matching is decided from an index, without decoding records, and only
    /// the returned slots are decoded. A record that cannot be decoded is an
    /// `Err` in its slot and still counts toward `offset` and `limit`. The
    /// outer error is reserved for failing to enumerate the store at all.
    fn scan(&self, filter: &ModelFilter, offset: usize, limit: usize) -> StorageResult<ScanPage>;
}
