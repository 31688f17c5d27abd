pub mod remote;

use std::sync::Mutex;

use log::debug;

use crate::config::ResolverMode;
use crate::db::mapping_store::MappingStore;
use crate::errors::{Result, ShortenerError};
use crate::state::app_state::lock_store;
use remote::RemoteResolver;

/// Progress of a single redirect: `Pending -> Resolved | NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Pending,
    Resolved(String),
    NotFound,
}

impl ResolutionState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, ResolutionState::Pending)
    }
}

/// Turns a short code into a target URL, either from the local store or from
/// a remote shortener exposing `GET /api/url/{code}`.
pub enum RedirectResolver {
    Local,
    Remote(RemoteResolver),
}

impl RedirectResolver {
    pub fn from_mode(mode: &ResolverMode) -> Self {
        match mode {
            ResolverMode::Local => RedirectResolver::Local,
            ResolverMode::Remote(base_url) => {
                RedirectResolver::Remote(RemoteResolver::new(base_url.clone()))
            }
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            RedirectResolver::Local => "local",
            RedirectResolver::Remote(_) => "remote",
        }
    }

    pub async fn resolve(&self, code: &str, store: &Mutex<MappingStore>) -> Result<ResolutionState> {
        debug!("Resolving {} ({} mode)", code, self.mode_name());
        let state = match self {
            RedirectResolver::Local => resolve_local(code, store)?,
            RedirectResolver::Remote(remote) => remote.lookup(code).await?,
        };
        debug!("Resolved {} -> {:?}", code, state);
        Ok(state)
    }
}

fn resolve_local(code: &str, store: &Mutex<MappingStore>) -> Result<ResolutionState> {
    let store = lock_store(store)?;
    match store.resolve(code) {
        Ok(url) => Ok(ResolutionState::Resolved(url)),
        Err(ShortenerError::NotFound) | Err(ShortenerError::Expired) => {
            Ok(ResolutionState::NotFound)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryBackend;
    use crate::db::mapping_store::StoreOptions;

    fn store_with(code: &str, url: &str, options: StoreOptions) -> Mutex<MappingStore> {
        let mut store = MappingStore::open(Box::new(MemoryBackend::new()), options).unwrap();
        store.issue(url, 30, Some(code)).unwrap();
        Mutex::new(store)
    }

    #[actix_web::test]
    async fn local_resolution() {
        let store = store_with("abc", "http://example.com", StoreOptions::default());
        let resolver = RedirectResolver::Local;

        assert_eq!(
            resolver.resolve("abc", &store).await.unwrap(),
            ResolutionState::Resolved("http://example.com".into())
        );
        assert_eq!(
            resolver.resolve("nope", &store).await.unwrap(),
            ResolutionState::NotFound
        );
    }

    #[actix_web::test]
    async fn expired_local_link_is_not_found_when_enforced() {
        let store = {
            let options = StoreOptions {
                enforce_expiry: true,
                ..StoreOptions::default()
            };
            let mut store = MappingStore::open(Box::new(MemoryBackend::new()), options).unwrap();
            let past = chrono::Utc::now() - chrono::Duration::hours(2);
            store
                .issue_at("http://example.com", 1, Some("old"), past)
                .unwrap();
            Mutex::new(store)
        };
        assert_eq!(
            RedirectResolver::Local.resolve("old", &store).await.unwrap(),
            ResolutionState::NotFound
        );
    }

    #[test]
    fn pending_is_the_initial_state() {
        let state = ResolutionState::default();
        assert_eq!(state, ResolutionState::Pending);
        assert!(!state.is_settled());
        assert!(ResolutionState::NotFound.is_settled());
    }
}
