//! Embargo and lease entities - time-bound access restrictions
//!
//! Both are owned by the resource they restrict. Once persisted each carries
//! its own identifier and the owning record stores only that reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Identifier, Visibility};

/// Common view over embargoes and leases used by the rule evaluator
pub trait TimeBound {
    /// The release (embargo) or expiration (lease) date
    fn restriction_date(&self) -> Option<DateTime<Utc>>;

    /// Log of past deactivations
    fn history(&self) -> &[String];
}

/// Access is restricted until `release_date`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embargo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_during: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_after: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
}

impl Embargo {
    pub fn until(release_date: DateTime<Utc>) -> Self {
        Self {
            release_date: Some(release_date),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, during: Visibility, after: Visibility) -> Self {
        self.visibility_during = Some(during);
        self.visibility_after = Some(after);
        self
    }

    pub fn with_history(mut self, entry: impl Into<String>) -> Self {
        self.history.push(entry.into());
        self
    }
}

impl TimeBound for Embargo {
    fn restriction_date(&self) -> Option<DateTime<Utc>> {
        self.release_date
    }

    fn history(&self) -> &[String] {
        &self.history
    }
}

/// Access is granted until `expiration_date`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_during: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_after: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
}

impl Lease {
    pub fn until(expiration_date: DateTime<Utc>) -> Self {
        Self {
            expiration_date: Some(expiration_date),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, during: Visibility, after: Visibility) -> Self {
        self.visibility_during = Some(during);
        self.visibility_after = Some(after);
        self
    }

    pub fn with_history(mut self, entry: impl Into<String>) -> Self {
        self.history.push(entry.into());
        self
    }
}

impl TimeBound for Lease {
    fn restriction_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    fn history(&self) -> &[String] {
        &self.history
    }
}
