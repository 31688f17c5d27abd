use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::click_event::ClickEvent;
use crate::models::short_link::ShortLink;

fn default_validity() -> u32 {
    30
}

fn validate_shortcode(code: &str) -> Result<(), ValidationError> {
    if code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("shortcode_chars").with_message(
            "Shortcode may only contain letters, digits, '-' and '_'".into(),
        ))
    }
}

#[derive(Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UrlRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    #[serde(default = "default_validity")]
    #[validate(range(min = 1, max = 525600, message = "Validity must be 1 to 525600 minutes"))]
    pub validity_minutes: u32,
    #[validate(length(max = 32), custom(function = validate_shortcode))]
    pub shortcode: Option<String>,
}

#[derive(Deserialize)]
pub struct UrlSearchParams {
    pub search: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlListResponse {
    pub original_url: String,
    pub short_url: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expired: bool,
    pub click_count: usize,
    pub clicks: Vec<ClickEvent>,
}

impl From<&ShortLink> for UrlListResponse {
    fn from(link: &ShortLink) -> Self {
        Self {
            original_url: link.original_url.clone(),
            short_url: link.short_url.clone(),
            shortcode: link.short_code.clone(),
            created_at: link.created_at,
            expires_at: link.expires_at,
            expired: link.is_expired(),
            click_count: link.click_count(),
            clicks: link.clicks.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub original_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnalyticsResponse {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: usize,
    pub unique_clicks: usize,
    pub click_log: Vec<ClickEvent>,
}

impl From<&ShortLink> for UrlAnalyticsResponse {
    fn from(link: &ShortLink) -> Self {
        Self {
            shortcode: link.short_code.clone(),
            original_url: link.original_url.clone(),
            created_at: link.created_at,
            expires_at: link.expires_at,
            clicks: link.click_count(),
            unique_clicks: link.unique_visitors(),
            click_log: link.clicks.clone(),
        }
    }
}
