use std::io;
use std::sync::{Mutex, MutexGuard};

use crate::config::{AppConfig, DEFAULT_LOCATION_HEADER, DEFAULT_VISITOR_SALT};
use crate::db::mapping_store::MappingStore;
use crate::errors::{Result, ShortenerError};
use crate::resolver::RedirectResolver;

pub struct AppState {
    pub store: Mutex<MappingStore>,
    pub resolver: RedirectResolver,
    pub location_header: String,
    pub visitor_salt: String,
}

impl AppState {
    /// State with default click settings, for a store and resolver built by hand
    pub fn new(store: MappingStore, resolver: RedirectResolver) -> Self {
        Self {
            store: Mutex::new(store),
            resolver,
            location_header: DEFAULT_LOCATION_HEADER.to_string(),
            visitor_salt: DEFAULT_VISITOR_SALT.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig, store: MappingStore) -> Self {
        Self {
            store: Mutex::new(store),
            resolver: RedirectResolver::from_mode(&config.resolver),
            location_header: config.location_header.clone(),
            visitor_salt: config.visitor_salt.clone(),
        }
    }

    pub fn store(&self) -> Result<MutexGuard<'_, MappingStore>> {
        lock_store(&self.store)
    }
}

pub fn lock_store(store: &Mutex<MappingStore>) -> Result<MutexGuard<'_, MappingStore>> {
    store
        .lock()
        .map_err(|_| ShortenerError::Storage(io::Error::other("mapping store lock poisoned")))
}
