//! HTTP client for the free-to-play games catalog.
//!
//! One request per fetch: `GET {base}/games?platform=<id>` answered by a JSON
//! array of [`GameRecord`]s, decoded without any field transformation.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::record::{GameRecord, Platform};
use crate::config::CatalogConfig;

const DEFAULT_CATALOG_URL: &str = "https://www.freetogame.com/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Catalog fetch failures
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog service error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the catalog service
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    proxy_prefix: Option<String>,
}

impl CatalogClient {
    /// Create a client from the user config, honoring environment overrides
    pub fn from_config(config: &CatalogConfig) -> Self {
        let base_url = std::env::var("INGAME_CATALOG_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| config.base_url.clone());

        let timeout_seconds = std::env::var("INGAME_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or_else(|| config.timeout_seconds.max(1));

        Self::with_settings(base_url, config.proxy_prefix.clone(), timeout_seconds)
    }

    /// Create with custom base URL and default settings
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self::with_settings(base_url.into(), None, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn with_settings(
        base_url: String,
        proxy_prefix: Option<String>,
        timeout_seconds: u64,
    ) -> Self {
        let timeout = Duration::from_secs(timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ingame/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        CatalogClient {
            client,
            base_url: normalize_base_url(&base_url),
            proxy_prefix: proxy_prefix
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }

    /// Full request URL for a platform, proxy prefix included.
    pub fn request_url(&self, platform: Platform) -> String {
        let direct = format!(
            "{}/games?platform={}",
            self.base_url,
            platform.as_api_value()
        );
        match &self.proxy_prefix {
            Some(prefix) => format!("{prefix}{direct}"),
            None => direct,
        }
    }

    /// Fetch the whole catalog for `platform` (`pc` when absent).
    pub async fn fetch(&self, platform: Option<Platform>) -> Result<Vec<GameRecord>, CatalogError> {
        let platform = platform.unwrap_or_default();
        let url = self.request_url(platform);
        tracing::debug!(%platform, %url, "fetching catalog");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let records = parse_catalog(&body)?;
        tracing::info!(%platform, count = records.len(), "catalog fetched");
        Ok(records)
    }
}

/// Decode a catalog response body.
pub fn parse_catalog(body: &str) -> Result<Vec<GameRecord>, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return DEFAULT_CATALOG_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
