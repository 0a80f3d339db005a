//! IdentifierMinter port - source of fresh identifiers
//!
//! Implementations guarantee uniqueness under concurrent callers; callers
//! add no locking of their own.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MintError {
    #[error("identifier minter unavailable: {0}")]
    Unavailable(String),

    #[error("identifier minter exhausted")]
    Exhausted,
}

pub trait IdentifierMinter: Send + Sync {
    /// Return a fresh, unique, opaque identifier
    fn mint(&self) -> Result<String, MintError>;
}
