use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::sources::traits::Fetcher;
use crate::utils::format_bytes;
use crate::utils::url::UrlUtils;

/// Plain HTTP GET fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &HttpConfig) -> AppResult<Self> {
        Self::new(config.timeout, &config.user_agent)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<Bytes> {
        let display_url = UrlUtils::obfuscate_credentials(url);
        debug!("Fetching {}", display_url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", display_url, e);
            SourceError::unavailable(&display_url, e.without_url().to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "HTTP error: {} {} - URL: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                display_url
            );
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: display_url,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            SourceError::unavailable(
                &display_url,
                format!("Failed to read response: {}", e.without_url()),
            )
        })?;

        debug!("Downloaded {} from {}", format_bytes(bytes.len() as u64), display_url);
        Ok(bytes)
    }
}
