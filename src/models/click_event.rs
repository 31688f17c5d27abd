use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub source: String,   // Referrer, or "direct"
    pub location: String, // Country hint from the edge proxy, or "unknown"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor: Option<String>, // Hashed client IP
}

impl ClickEvent {
    pub fn new(source: String, location: String, visitor: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            source,
            location,
            visitor,
        }
    }
}
