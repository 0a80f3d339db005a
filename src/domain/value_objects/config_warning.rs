//! Unknown configuration keys

use std::fmt;
use std::path::PathBuf;

/// A key in a `strata.toml` that no section recognizes
///
/// Loading still succeeds; the host decides whether to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the unknown key (`backnd`)
    pub key: String,
    /// Full dotted path as seen by the deserializer (`storage.backnd`)
    pub path: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence, when found
    pub line: Option<usize>,
    /// Closest known key
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.path, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}
