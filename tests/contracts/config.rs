//! Configuration contracts
//!
//! Priority: environment variables > project config > user config > defaults.
//! Unknown keys are reported, never fatal.

use std::path::Path;

use strata::config::{apply_overrides, parse_with_warnings, PROJECT_CONFIG_FILE};
use strata::{BackendKind, MinterKind, Runtime, StrataConfig};

/// CONTRACT: every section has a usable default
mod defaults {
    use super::*;

    #[test]
    fn contract_empty_file_is_default_config() {
        let (config, warnings) = parse_with_warnings("", Path::new(PROJECT_CONFIG_FILE)).unwrap();
        assert_eq!(config, StrataConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.identity.minter, MinterKind::Uuid);
    }
}

/// CONTRACT: environment overrides win over file values
mod env_priority {
    use super::*;

    #[test]
    fn contract_env_overrides_project_file() {
        let (config, _) = parse_with_warnings(
            r#"
            [storage]
            backend = "disk"
            path = "/var/lib/strata"
            page_size = 50

            [identity]
            minter = "uuid"
            "#,
            Path::new(PROJECT_CONFIG_FILE),
        )
        .unwrap();

        let config = apply_overrides(config, |name: &str| match name {
            "STRATA_STORAGE_BACKEND" => Some("triple".to_string()),
            "STRATA_PAGE_SIZE" => Some("25".to_string()),
            "STRATA_MINTER" => Some("sequence".to_string()),
            "STRATA_MINTER_PREFIX" => Some("ark:/99999/".to_string()),
            _ => None,
        });

        assert_eq!(config.storage.backend, BackendKind::Triple);
        assert_eq!(config.storage.page_size, 25);
        assert_eq!(config.identity.minter, MinterKind::Sequence);

        let runtime = Runtime::from_config(&config).unwrap();
        assert_eq!(runtime.facade().backend_name(), "triple");
        assert_eq!(runtime.minter().mint().unwrap(), "ark:/99999/1");
    }
}

/// CONTRACT: unknown keys are warnings with suggestions
mod unknown_keys {
    use super::*;

    #[test]
    fn contract_typo_is_reported_not_fatal() {
        let (config, warnings) = parse_with_warnings(
            r#"
            [storage]
            backnd = "disk"
            "#,
            Path::new(PROJECT_CONFIG_FILE),
        )
        .unwrap();

        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("backend"));
    }
}
