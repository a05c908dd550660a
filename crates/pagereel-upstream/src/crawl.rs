//! Crawl service HTTP client.

use std::time::Duration;

use pagereel_models::{AssetRef, Scene};
use reqwest::Client;
use tracing::debug;

use crate::error::{UpstreamError, UpstreamResult};
use crate::types::{CrawlReply, CrawlRequest};

const DEFAULT_CRAWL_URL: &str = "http://localhost:8008/api/v1/text/urlCrawl";

/// Configuration for the crawl client.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Full URL of the crawl endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CRAWL_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl CrawlConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("CRAWL_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_CRAWL_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("CRAWL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }
}

/// Client for the landing page extraction service.
pub struct CrawlClient {
    http: Client,
    config: CrawlConfig,
}

impl CrawlClient {
    /// Create a new crawl client.
    pub fn new(config: CrawlConfig) -> UpstreamResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pagereel-upstream/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> UpstreamResult<Self> {
        Self::new(CrawlConfig::from_env())
    }

    /// Crawl a landing page into ordered scenes.
    ///
    /// Record *i* of the reply becomes scene `i + 1`; each material
    /// location becomes an asset with kind and suffix derived from the
    /// trailing filename segment. An empty reply yields no scenes.
    pub async fn crawl(&self, url: &str) -> UpstreamResult<Vec<Scene>> {
        if url.trim().is_empty() {
            return Err(UpstreamError::validation("URL is required"));
        }

        debug!("Sending crawl request to {}", self.config.endpoint);

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&CrawlRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.wrap_transport(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::request_failed(format!(
                "Crawl service returned {}: {}",
                status, body
            )));
        }

        let reply: CrawlReply = response.json().await.map_err(|e| self.wrap_transport(e))?;
        if reply.code != 200 {
            let msg = reply.msg.unwrap_or_else(|| "Failed to crawl URL".to_string());
            return Err(UpstreamError::service(reply.code, msg));
        }

        let scenes = reply
            .data
            .into_iter()
            .enumerate()
            .map(|(idx, record)| Scene {
                id: idx as u32 + 1,
                content: record.text,
                assets: record
                    .materials
                    .into_iter()
                    .map(AssetRef::from_location)
                    .collect(),
            })
            .collect();

        Ok(scenes)
    }

    fn wrap_transport(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.config.timeout.as_secs())
        } else {
            UpstreamError::Network(err)
        }
    }
}
