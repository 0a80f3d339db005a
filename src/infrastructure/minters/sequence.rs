//! Prefixed sequence minter
//!
//! Mints `<prefix><n>` from an atomic counter, so concurrent callers always
//! receive distinct values. The counter is process-local.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ports::{IdentifierMinter, MintError};

#[derive(Debug)]
pub struct SequenceMinter {
    prefix: String,
    next: AtomicU64,
}

impl SequenceMinter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl IdentifierMinter for SequenceMinter {
    fn mint(&self) -> Result<String, MintError> {
        let n = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| MintError::Exhausted)?;
        Ok(format!("{}{n}", self.prefix))
    }
}
