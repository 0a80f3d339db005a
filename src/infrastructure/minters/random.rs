//! Random (v4) UUID minter

use uuid::Uuid;

use crate::domain::ports::{IdentifierMinter, MintError};

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidMinter;

impl UuidMinter {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierMinter for UuidMinter {
    fn mint(&self) -> Result<String, MintError> {
        Ok(Uuid::new_v4().to_string())
    }
}
