//! HTTP client for the Wikimedia per-article pageviews endpoint
//!
//! One request at a time, each preceded by a fixed throttle pause, each
//! carrying the configured `User-Agent`.

use crate::params::RequestParams;
use crate::source::{PageviewResponse, PageviewSource};
use async_trait::async_trait;
use dino_common::{validate_non_empty, PageviewsError, Result};
use dino_config::{Config, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Configuration for the pageviews client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the `per-article/...` path is appended to
    pub endpoint: String,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Pause before every request (default: 8 ms)
    pub throttle: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            throttle: Duration::from_millis(8),
        }
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.api.endpoint.clone(),
            user_agent: config.api.user_agent.clone(),
            timeout_secs: config.api.timeout_secs,
            throttle: config.throttle.interval(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the pause before each request
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }
}

/// Pageviews API client
#[derive(Debug, Clone)]
pub struct PageviewsClient {
    client: Client,
    config: ClientConfig,
}

impl PageviewsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        validate_non_empty(&config.user_agent, "user_agent")?;
        validate_non_empty(&config.endpoint, "endpoint")?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PageviewsError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request one article's series for one access type.
    ///
    /// Sleeps the throttle interval first, whatever happened to the previous
    /// request. A decodable error body (e.g. a 404 problem document) is
    /// returned as `Ok` without items.
    #[instrument(skip(self, params), fields(article = %params.article, access = %params.access))]
    pub async fn request_pageviews(&self, params: &RequestParams) -> Result<PageviewResponse> {
        let url = params.request_url(&self.config.endpoint)?;

        if !self.config.throttle.is_zero() {
            tokio::time::sleep(self.config.throttle).await;
        }

        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            PageviewsError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            PageviewsError::network_with_source("Failed to read response body", e)
        })?;

        if text.trim().is_empty() {
            warn!(status = status.as_u16(), "Empty response body");
            return Err(PageviewsError::empty_response(format!(
                "HTTP {} with an empty body",
                status.as_u16()
            )));
        }

        let parsed: PageviewResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(status = status.as_u16(), "Failed to decode response: {}", e);
            PageviewsError::from(e)
        })?;

        if status.is_success() {
            debug!(
                items = parsed.items.as_ref().map_or(0, Vec::len),
                "Request successful"
            );
        } else {
            debug!(status = status.as_u16(), title = ?parsed.title, "Endpoint returned a problem document");
        }

        Ok(parsed)
    }
}

#[async_trait]
impl PageviewSource for PageviewsClient {
    async fn fetch(&self, params: &RequestParams) -> Result<PageviewResponse> {
        self.request_pageviews(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_common::Access;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("http://localhost:9/", "tests <t@example.org>")
            .with_timeout(5)
            .with_throttle(Duration::ZERO);

        assert_eq!(config.endpoint, "http://localhost:9/");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.throttle.is_zero());
    }

    #[test]
    fn test_client_config_from_app_config() {
        let config = ClientConfig::from(&Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.throttle, Duration::from_millis(8));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = ClientConfig::new(DEFAULT_ENDPOINT, "");
        assert!(PageviewsClient::new(config).is_err());
    }

    #[tokio::test]
    async fn test_empty_title_rejected_without_request() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = PageviewsClient::new(
            ClientConfig::new("http://127.0.0.1:9/", "tests <t@example.org>")
                .with_throttle(Duration::ZERO),
        )
        .unwrap();

        let params = RequestParams::default().with_article("");
        let err = client.fetch(&params).await.unwrap_err();
        assert!(matches!(err, PageviewsError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let client = PageviewsClient::new(
            ClientConfig::new("http://127.0.0.1:9/", "tests <t@example.org>")
                .with_timeout(2)
                .with_throttle(Duration::ZERO),
        )
        .unwrap();

        let params = RequestParams::default()
            .with_article("Tyrannosaurus")
            .with_access(Access::MobileWeb);
        let err = client.fetch(&params).await.unwrap_err();
        assert!(err.is_transport_failure());
    }
}
