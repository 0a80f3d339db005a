//! FixityCheck port - per-file-set integrity verification
//!
//! The check itself (checksums, audit logging) belongs to the host; the
//! sweep only drives it over every file set.

use anyhow::Result;

use crate::domain::entities::Resource;

pub trait FixityCheck {
    /// Verify the files of one file set
    fn check(&self, file_set: &Resource) -> Result<()>;
}
