//! Identity allocator
//!
//! Decides the alternate identifier of a transformed resource.

use tracing::debug;

use crate::domain::ports::{IdentifierMinter, MintError};
use crate::domain::value_objects::Identifier;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityAllocationError {
    #[error("identifier minter failed: {0}")]
    Mint(#[from] MintError),

    #[error("identifier minter returned an empty identifier")]
    EmptyIdentifier,
}

/// Reuses existing identifiers and mints the rest
///
/// Holds no state of its own; uniqueness under concurrent callers is the
/// minter's job.
#[derive(Clone, Copy)]
pub struct IdentityAllocator<'a> {
    minter: &'a dyn IdentifierMinter,
}

impl<'a> IdentityAllocator<'a> {
    pub fn new(minter: &'a dyn IdentifierMinter) -> Self {
        Self { minter }
    }

    /// Return `source_id` when non-blank, otherwise mint exactly once
    pub fn allocate(&self, source_id: Option<&str>) -> Result<Identifier, IdentityAllocationError> {
        if let Some(existing) = source_id.and_then(Identifier::parse) {
            return Ok(existing);
        }

        let minted = self.minter.mint()?;
        let id = Identifier::parse(&minted).ok_or(IdentityAllocationError::EmptyIdentifier)?;
        debug!(alternate_id = %id, "minted identifier");
        Ok(id)
    }
}
