//! Configuration module for Strata
//!
//! Configuration hierarchy:
//! 1. Environment variables (STRATA_*)
//! 2. Project config (`strata.toml` in the project root)
//! 3. User config (`<config dir>/strata/config.toml`)
//! 4. Built-in defaults

mod env_validator;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use env_validator::EnvVarValidator;
pub use loader::{apply_overrides, parse_with_warnings, user_config_path, PROJECT_CONFIG_FILE};
pub use types::{
    BackendKind, CollectionsConfig, IdentityConfig, MinterKind, StorageConfig, StrataConfig,
};
