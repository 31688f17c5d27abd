use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use uuid::Uuid;

use crate::config::CollisionPolicy;
use crate::db::backend::KvBackend;
use crate::errors::{Result, ShortenerError};
use crate::models::click_event::ClickEvent;
use crate::models::short_link::ShortLink;

pub const URL_DATA_KEY: &str = "urlData";
pub const URL_MAPPINGS_KEY: &str = "urlMappings";
const GENERATED_CODE_LEN: usize = 6;

/// First path segments owned by other routes; a code equal to one of these
/// could be issued but never redirected.
pub const RESERVED_CODES: &[&str] = &["api"];

pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub base_url: String,
    pub collision_policy: CollisionPolicy,
    pub enforce_expiry: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            collision_policy: CollisionPolicy::Overwrite,
            enforce_expiry: false,
        }
    }
}

/// Owns every short link and its click log.
///
/// Two tables are kept side by side: `urlData`, the ordered list of links with
/// their click logs, and `urlMappings`, the code to URL index that redirects
/// read from. Both are written back to the backend after each mutation.
pub struct MappingStore {
    backend: Box<dyn KvBackend>,
    options: StoreOptions,
    url_data: Vec<ShortLink>,
    url_mappings: HashMap<String, String>,
}

impl MappingStore {
    pub fn open(backend: Box<dyn KvBackend>, options: StoreOptions) -> Result<Self> {
        let url_data: Vec<ShortLink> = match backend.get_item(URL_DATA_KEY)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => Vec::new(),
        };
        let url_mappings: HashMap<String, String> = match backend.get_item(URL_MAPPINGS_KEY)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => HashMap::new(),
        };

        info!(
            "Mapping store loaded from {} backend: {} links, {} mappings",
            backend.name(),
            url_data.len(),
            url_mappings.len()
        );

        Ok(Self {
            backend,
            options,
            url_data,
            url_mappings,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn issue(
        &mut self,
        original_url: &str,
        validity_minutes: u32,
        preferred_code: Option<&str>,
    ) -> Result<ShortLink> {
        self.issue_at(original_url, validity_minutes, preferred_code, Utc::now())
    }

    pub fn issue_at(
        &mut self,
        original_url: &str,
        validity_minutes: u32,
        preferred_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ShortLink> {
        if !original_url.starts_with("http") {
            return Err(ShortenerError::InvalidUrl);
        }

        let code = match preferred_code.map(str::trim) {
            Some(code) if !code.is_empty() => {
                if is_reserved_code(code) {
                    return Err(ShortenerError::ReservedCode(code.to_string()));
                }
                if self.url_mappings.contains_key(code) {
                    match self.options.collision_policy {
                        CollisionPolicy::Reject => {
                            return Err(ShortenerError::CodeTaken(code.to_string()));
                        }
                        CollisionPolicy::Overwrite => {
                            warn!("Short code {} already exists, overwriting", code);
                        }
                    }
                }
                code.to_string()
            }
            _ => generate_code(),
        };

        let link = ShortLink::new(
            original_url.to_string(),
            code.clone(),
            &self.options.base_url,
            validity_minutes,
            now,
        );

        let mut url_data = self.url_data.clone();
        url_data.retain(|existing| existing.short_code != code);
        url_data.push(link.clone());
        let mut url_mappings = self.url_mappings.clone();
        url_mappings.insert(code.clone(), link.original_url.clone());
        self.commit(url_data, url_mappings)?;

        info!("Issued short code {} -> {}", code, link.original_url);
        Ok(link)
    }

    pub fn resolve(&self, short_code: &str) -> Result<String> {
        self.resolve_at(short_code, Utc::now())
    }

    pub fn resolve_at(&self, short_code: &str, now: DateTime<Utc>) -> Result<String> {
        let target = self
            .url_mappings
            .get(short_code)
            .ok_or(ShortenerError::NotFound)?;

        if self.options.enforce_expiry {
            if let Some(link) = self.get(short_code) {
                if link.is_expired_at(now) {
                    return Err(ShortenerError::Expired);
                }
            }
        }

        Ok(target.clone())
    }

    /// Appends a click to the link's log. Returns `false` for unknown codes.
    pub fn record_click(&mut self, short_code: &str, event: ClickEvent) -> Result<bool> {
        let Some(index) = self
            .url_data
            .iter()
            .position(|link| link.short_code == short_code)
        else {
            return Ok(false);
        };

        let mut url_data = self.url_data.clone();
        url_data[index].clicks.push(event);
        self.backend
            .set_item(URL_DATA_KEY, &serde_json::to_string(&url_data)?)?;
        self.url_data = url_data;
        Ok(true)
    }

    pub fn get(&self, short_code: &str) -> Option<&ShortLink> {
        self.url_data
            .iter()
            .find(|link| link.short_code == short_code)
    }

    pub fn list(&self) -> &[ShortLink] {
        &self.url_data
    }

    pub fn len(&self) -> usize {
        self.url_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url_data.is_empty()
    }

    /// Persist both tables, then swap them in. The in-memory tables only
    /// change once both blobs are written.
    fn commit(
        &mut self,
        url_data: Vec<ShortLink>,
        url_mappings: HashMap<String, String>,
    ) -> Result<()> {
        let data = serde_json::to_string(&url_data)?;
        let mappings = serde_json::to_string(&url_mappings)?;

        self.backend.set_item(URL_DATA_KEY, &data)?;
        if let Err(e) = self.backend.set_item(URL_MAPPINGS_KEY, &mappings) {
            // Put urlData back so the two blobs agree
            let previous = serde_json::to_string(&self.url_data)?;
            if let Err(restore) = self.backend.set_item(URL_DATA_KEY, &previous) {
                error!("Failed to restore {} after a failed save: {}", URL_DATA_KEY, restore);
            }
            return Err(e);
        }

        self.url_data = url_data;
        self.url_mappings = url_mappings;
        Ok(())
    }
}

fn generate_code() -> String {
    Uuid::new_v4().to_string()[..GENERATED_CODE_LEN].to_string()
}
