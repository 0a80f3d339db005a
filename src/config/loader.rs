//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{StrataError, StrataResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{BackendKind, MinterKind, StrataConfig};

pub use crate::domain::value_objects::ConfigWarning;

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "strata.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StrataResult<(StrataConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for error and warning context
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> StrataResult<(StrataConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: StrataConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StrataError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                path: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> StrataConfig {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                for w in &warnings {
                    warn!(key = %w.key, "{w}");
                }
                debug!(file = %path.display(), "loaded configuration");
                return with_env_overrides(config);
            }
            Err(e) => warn!(file = %path.display(), error = %e, "skipping unreadable configuration"),
        }
    }

    with_env_overrides(StrataConfig::default())
}

/// `<config dir>/strata/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strata").join("config.toml"))
}

/// Apply environment variable overrides (STRATA_* prefix)
pub fn with_env_overrides(config: StrataConfig) -> StrataConfig {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_overrides<F>(mut config: StrataConfig, lookup: F) -> StrataConfig
where
    F: Fn(&str) -> Option<String>,
{
    // STRATA_STORAGE_BACKEND
    if let Some(value) = lookup("STRATA_STORAGE_BACKEND") {
        let validator = EnvVarValidator::new("STRATA_STORAGE_BACKEND", BackendKind::NAMES);
        if let Some(backend) = validator.parse(&value, BackendKind::parse) {
            config.storage.backend = backend;
        }
    }

    // STRATA_STORAGE_PATH
    if let Some(path) = lookup("STRATA_STORAGE_PATH").filter(|p| !p.trim().is_empty()) {
        config.storage.path = Some(PathBuf::from(path));
    }

    // STRATA_PAGE_SIZE (positive integer)
    if let Some(value) = lookup("STRATA_PAGE_SIZE") {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => config.storage.page_size = n,
            _ => warn!(value = %value, "ignoring invalid STRATA_PAGE_SIZE"),
        }
    }

    // STRATA_MINTER
    if let Some(value) = lookup("STRATA_MINTER") {
        let validator = EnvVarValidator::new("STRATA_MINTER", MinterKind::NAMES);
        if let Some(minter) = validator.parse(&value, MinterKind::parse) {
            config.identity.minter = minter;
        }
    }

    // STRATA_MINTER_PREFIX
    if let Some(prefix) = lookup("STRATA_MINTER_PREFIX") {
        config.identity.prefix = prefix;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "storage",
        "backend",
        "path",
        "page_size",
        "identity",
        "minter",
        "prefix",
        "collections",
        "nestable_types",
        "schema",
        "model",
        "kind",
        "properties",
        "relationships",
        "name",
        "cardinality",
        "required",
        "target",
        "field",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
