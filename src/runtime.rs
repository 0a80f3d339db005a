//! Runtime wiring
//!
//! A `Runtime` owns the schema registry, the active storage backend and the
//! identifier minter chosen by configuration. It is built once at startup
//! and handed to callers; the services it hands out borrow from it.

use tracing::info;

use crate::application::{
    BatchSweep, Migration, NestedCollectionQuery, RestrictionService, SaveResource, StorageFacade,
};
use crate::config::{BackendKind, MinterKind, StrataConfig};
use crate::domain::ports::{IdentifierMinter, StorageBackend};
use crate::domain::schema::SchemaRegistry;
use crate::domain::services::{ModelTransformer, NestingRules};
use crate::error::{StrataError, StrataResult};
use crate::infrastructure::{DiskBackend, MemoryBackend, SequenceMinter, TripleBackend, UuidMinter};

pub struct Runtime {
    registry: SchemaRegistry,
    facade: StorageFacade,
    minter: Box<dyn IdentifierMinter>,
    nesting: NestingRules,
}

impl Runtime {
    pub fn from_config(config: &StrataConfig) -> StrataResult<Self> {
        let backend: Box<dyn StorageBackend> = match config.storage.backend {
            BackendKind::Memory => Box::new(MemoryBackend::new()),
            BackendKind::Triple => Box::new(TripleBackend::new()),
            BackendKind::Disk => {
                let path = config.storage.path.as_deref().ok_or_else(|| {
                    StrataError::MissingStoragePath {
                        backend: BackendKind::Disk.as_str().to_string(),
                    }
                })?;
                Box::new(DiskBackend::open(path)?)
            }
        };
        let minter: Box<dyn IdentifierMinter> = match config.identity.minter {
            MinterKind::Uuid => Box::new(UuidMinter),
            MinterKind::Sequence => Box::new(SequenceMinter::new(config.identity.prefix.clone())),
        };
        let registry = config.registry();

        info!(
            backend = backend.name(),
            minter = ?config.identity.minter,
            models = registry.len(),
            page_size = config.storage.page_size,
            "strata runtime ready"
        );

        Ok(Self {
            registry,
            facade: StorageFacade::new(backend).with_page_size(config.storage.page_size),
            minter,
            nesting: config.nesting_rules(),
        })
    }

    /// Default configuration: memory backend, UUID minter, built-in models
    pub fn in_memory() -> Self {
        Self {
            registry: SchemaRegistry::with_defaults(),
            facade: StorageFacade::new(Box::new(MemoryBackend::new())),
            minter: Box::new(UuidMinter),
            nesting: StrataConfig::default().nesting_rules(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn facade(&self) -> &StorageFacade {
        &self.facade
    }

    pub fn minter(&self) -> &dyn IdentifierMinter {
        self.minter.as_ref()
    }

    pub fn nesting_rules(&self) -> &NestingRules {
        &self.nesting
    }

    pub fn transformer(&self) -> ModelTransformer<'_> {
        ModelTransformer::new(&self.registry, self.minter.as_ref())
    }

    pub fn saver(&self) -> SaveResource<'_> {
        SaveResource::new(&self.registry, &self.facade)
    }

    pub fn migration(&self) -> Migration<'_> {
        Migration::new(self.transformer(), self.saver())
    }

    pub fn sweep(&self) -> BatchSweep<'_> {
        BatchSweep::new(&self.facade)
    }

    pub fn restrictions(&self) -> RestrictionService<'_> {
        RestrictionService::new(&self.facade)
    }

    pub fn nested_collections(&self) -> NestedCollectionQuery<'_> {
        NestedCollectionQuery::new(&self.nesting, &self.facade)
    }
}
