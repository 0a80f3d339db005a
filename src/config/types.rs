//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::schema::{SchemaDescriptor, SchemaRegistry};
use crate::domain::services::NestingRules;
use crate::error::StrataResult;

use super::loader::{self, ConfigWarning};

/// Which storage backend the runtime activates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    Disk,
    Triple,
}

impl BackendKind {
    pub const NAMES: &'static [&'static str] = &["memory", "disk", "triple"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "mem" => Some(BackendKind::Memory),
            "disk" | "file" => Some(BackendKind::Disk),
            "triple" | "rdf" => Some(BackendKind::Triple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Disk => "disk",
            BackendKind::Triple => "triple",
        }
    }
}

/// Which identifier minter the runtime uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MinterKind {
    #[default]
    Uuid,
    Sequence,
}

impl MinterKind {
    pub const NAMES: &'static [&'static str] = &["uuid", "sequence"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "uuid" => Some(MinterKind::Uuid),
            "sequence" | "seq" => Some(MinterKind::Sequence),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Root directory for the disk backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Records fetched per page by `find_all`
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: None,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    100
}

/// Identifier minting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub minter: MinterKind,

    /// Prefix for the sequence minter
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            minter: MinterKind::default(),
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "strata-".to_string()
}

/// Collection nesting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsConfig {
    /// Collection type ids whose collections may contain each other
    #[serde(default = "default_nestable_types")]
    pub nestable_types: Vec<String>,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            nestable_types: default_nestable_types(),
        }
    }
}

fn default_nestable_types() -> Vec<String> {
    vec!["user_collection".to_string()]
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StrataConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub collections: CollectionsConfig,

    /// Descriptors added to (or replacing) the built-in models
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<SchemaDescriptor>,
}

impl StrataConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StrataResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StrataResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (STRATA_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Built-in descriptors plus the configured `[[schema]]` entries
    pub fn registry(&self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::with_defaults();
        for descriptor in &self.schema {
            registry.register(descriptor.clone());
        }
        registry
    }

    pub fn nesting_rules(&self) -> NestingRules {
        NestingRules::new(self.collections.nestable_types.iter().cloned())
    }
}
