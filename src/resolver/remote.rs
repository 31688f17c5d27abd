use log::{debug, error};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::errors::{Result, ShortenerError};
use crate::resolver::ResolutionState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteLookup {
    original_url: Option<String>,
}

/// Single-shot lookup against another shortener. No retry, no timeout.
pub struct RemoteResolver {
    client: Client,
    base_url: String,
}

impl RemoteResolver {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn endpoint_for(&self, code: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ShortenerError::Upstream(format!("bad resolver URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ShortenerError::Upstream("resolver URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "url", code]);
        Ok(url)
    }

    pub async fn lookup(&self, code: &str) -> Result<ResolutionState> {
        let url = self.endpoint_for(code)?;
        debug!("Remote lookup {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Error during redirection: {}", e);
            ShortenerError::Upstream(e.to_string())
        })?;

        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::GONE) {
            return Ok(ResolutionState::NotFound);
        }

        let body: RemoteLookup = response
            .error_for_status()
            .map_err(|e| ShortenerError::Upstream(e.to_string()))?
            .json()
            .await
            .map_err(|e| {
                error!("Remote resolver returned an unreadable body: {}", e);
                ShortenerError::Upstream(e.to_string())
            })?;

        Ok(match body.original_url {
            Some(url) if !url.is_empty() => ResolutionState::Resolved(url),
            _ => ResolutionState::NotFound,
        })
    }
}
