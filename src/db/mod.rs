pub mod backend;
pub mod mapping_store;

use crate::config::{AppConfig, StoreBackendKind};
use crate::errors::Result;
use backend::{FileBackend, KvBackend, MemoryBackend};
use mapping_store::{MappingStore, StoreOptions};

/// Open the mapping store described by the configuration
pub fn open_store(config: &AppConfig) -> Result<MappingStore> {
    let backend: Box<dyn KvBackend> = match &config.backend {
        StoreBackendKind::File(dir) => Box::new(FileBackend::open(dir)?),
        StoreBackendKind::Memory => Box::new(MemoryBackend::new()),
    };

    MappingStore::open(
        backend,
        StoreOptions {
            base_url: config.public_base_url.clone(),
            collision_policy: config.collision_policy,
            enforce_expiry: config.enforce_expiry,
        },
    )
}
