//! Upstream HTTP client
//!
//! One GET per refresh; no retries at this layer.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::BreweryEntity;

use super::wire::decode_breweries;

const USER_AGENT: &str = concat!("BreweryAPI/", env!("CARGO_PKG_VERSION"));

/// Source of the full brewery dataset.
///
/// Implementations must not touch shared state beyond the network call.
#[async_trait]
pub trait BreweryClient: Send + Sync {
    /// Fetches every brewery the source exposes.
    async fn fetch_all(&self) -> Result<Vec<BreweryEntity>, UpstreamError>;
}

/// Client for the Open Brewery DB listing endpoint.
#[derive(Debug, Clone)]
pub struct OpenBreweryClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl OpenBreweryClient {
    /// Creates a client for `base_url` (e.g. `https://api.openbrewerydb.org/v1`).
    pub fn new(
        base_url: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size,
        })
    }

    /// Creates a client from the upstream settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(
            config.upstream_base_url.clone(),
            config.upstream_page_size,
            config.upstream_timeout_duration(),
        )
    }

    /// Full URL of the listing endpoint.
    pub fn listing_url(&self) -> String {
        format!("{}/breweries?per_page={}", self.base_url, self.page_size)
    }

    async fn fetch_body(&self) -> Result<Vec<u8>, UpstreamError> {
        let response = self
            .http
            .get(self.listing_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl BreweryClient for OpenBreweryClient {
    async fn fetch_all(&self) -> Result<Vec<BreweryEntity>, UpstreamError> {
        info!(url = %self.listing_url(), "Fetching breweries from upstream");

        let result = match self.fetch_body().await {
            Ok(body) => decode_breweries(&body),
            Err(e) => Err(e),
        };

        match &result {
            Ok(breweries) => info!(count = breweries.len(), "Fetched breweries from upstream"),
            Err(e) => error!(error = %e, "Failed to fetch breweries from upstream"),
        }
        result
    }
}
