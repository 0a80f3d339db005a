//! Visibility value object - who may see a resource
//!
//! Embargoes and leases name a visibility to apply while the restriction
//! holds and another once it lifts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visibility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone, including anonymous users
    Open,
    /// Any signed-in user
    Authenticated,
    /// Only explicitly granted principals
    Restricted,
}

impl Visibility {
    /// The read group that grants this visibility, if any
    pub fn read_group(&self) -> Option<&'static str> {
        match self {
            Visibility::Open => Some("public"),
            Visibility::Authenticated => Some("registered"),
            Visibility::Restricted => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Open => write!(f, "open"),
            Visibility::Authenticated => write!(f, "authenticated"),
            Visibility::Restricted => write!(f, "restricted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility '{0}'")]
pub struct UnknownVisibility(pub String);

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "public" => Ok(Visibility::Open),
            "authenticated" | "registered" => Ok(Visibility::Authenticated),
            "restricted" | "private" => Ok(Visibility::Restricted),
            _ => Err(UnknownVisibility(s.to_string())),
        }
    }
}
