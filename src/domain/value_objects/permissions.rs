//! Access-control lists carried by every resource.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Visibility;

/// Principals allowed to read or edit a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub read_users: BTreeSet<String>,
    #[serde(default)]
    pub read_groups: BTreeSet<String>,
    #[serde(default)]
    pub edit_users: BTreeSet<String>,
    #[serde(default)]
    pub edit_groups: BTreeSet<String>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility implied by the read groups
    pub fn visibility(&self) -> Visibility {
        if self.read_groups.contains("public") {
            Visibility::Open
        } else if self.read_groups.contains("registered") {
            Visibility::Authenticated
        } else {
            Visibility::Restricted
        }
    }

    /// Replace the visibility groups, leaving other grants untouched
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.read_groups.remove("public");
        self.read_groups.remove("registered");
        if let Some(group) = visibility.read_group() {
            self.read_groups.insert(group.to_string());
        }
    }

    pub fn can_read(&self, user: &str, groups: &[&str]) -> bool {
        self.can_edit(user, groups)
            || self.read_users.contains(user)
            || groups.iter().any(|g| self.read_groups.contains(*g))
            || self.read_groups.contains("public")
    }

    pub fn can_edit(&self, user: &str, groups: &[&str]) -> bool {
        self.edit_users.contains(user) || groups.iter().any(|g| self.edit_groups.contains(*g))
    }

    pub fn is_empty(&self) -> bool {
        self.read_users.is_empty()
            && self.read_groups.is_empty()
            && self.edit_users.is_empty()
            && self.edit_groups.is_empty()
    }
}
