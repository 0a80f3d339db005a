//! Error types for Strata
//!
//! Each concern has its own `thiserror` enum; `StrataError` aggregates them
//! for callers that drive whole migrations.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::SaveError;
use crate::domain::ports::StorageError;
use crate::domain::services::TransformError;

/// Result type alias for Strata operations
pub type StrataResult<T> = Result<T, StrataError>;

/// Main error type for Strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    /// Legacy object could not be transformed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Storage backend failure, including `NotFound`
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Resource failed validation or could not be saved
    #[error(transparent)]
    Save(#[from] SaveError),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A file-backed storage backend was selected without a path
    #[error("storage backend '{backend}' requires [storage] path")]
    MissingStoragePath { backend: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StrataError {
    /// True for a lookup that found nothing
    pub fn is_not_found(&self) -> bool {
        match self {
            StrataError::Storage(e) => e.is_not_found(),
            StrataError::Save(SaveError::Storage(e)) => e.is_not_found(),
            _ => false,
        }
    }
}
