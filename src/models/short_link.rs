use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::click_event::ClickEvent;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub original_url: String,
    pub short_url: String,
    #[serde(rename = "shortcode")]
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>, // Click log, appended on every redirect
}

impl ShortLink {
    pub fn new(
        original_url: String,
        short_code: String,
        base_url: &str,
        validity_minutes: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), short_code);

        Self {
            original_url,
            short_url,
            short_code,
            created_at: now,
            expires_at: now + Duration::minutes(i64::from(validity_minutes)),
            clicks: Vec::new(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Number of distinct visitor hashes in the click log
    pub fn unique_visitors(&self) -> usize {
        let mut seen: Vec<&str> = self
            .clicks
            .iter()
            .filter_map(|c| c.visitor.as_deref())
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn expiry_is_created_plus_validity() {
        let link = ShortLink::new(
            "http://example.com".into(),
            "abc123".into(),
            "http://localhost:8080/",
            30,
            fixed_now(),
        );
        assert_eq!(link.expires_at - link.created_at, Duration::minutes(30));
        assert_eq!(link.short_url, "http://localhost:8080/abc123");
        assert!(!link.is_expired_at(fixed_now() + Duration::minutes(30)));
        assert!(link.is_expired_at(fixed_now() + Duration::minutes(31)));
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let link = ShortLink::new(
            "http://example.com".into(),
            "abc123".into(),
            "http://localhost:8080",
            5,
            fixed_now(),
        );
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["originalUrl"], "http://example.com");
        assert_eq!(value["shortcode"], "abc123");
        assert_eq!(value["shortUrl"], "http://localhost:8080/abc123");
        assert!(value["clicks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn counts_unique_visitors() {
        let mut link = ShortLink::new(
            "http://example.com".into(),
            "abc123".into(),
            "http://localhost:8080",
            5,
            fixed_now(),
        );
        for visitor in ["a", "b", "a"] {
            link.clicks.push(ClickEvent {
                timestamp: fixed_now(),
                source: "direct".into(),
                location: "unknown".into(),
                visitor: Some(visitor.into()),
            });
        }
        assert_eq!(link.click_count(), 3);
        assert_eq!(link.unique_visitors(), 2);
    }
}
