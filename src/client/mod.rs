//! HTTP clients for the measurement and optimization endpoints.
//!
//! Both endpoints are consumed as opaque services behind the [`MetricsApi`]
//! trait so the polling controller and the optimizer take an injected
//! collaborator and tests can substitute doubles.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Metrics path, relative to the base URL.
pub const STATS_PATH: &str = "/api/network-stats/";

/// Optimization path, relative to the base URL.
pub const OPTIMIZE_PATH: &str = "/api/optimize-network/";

/// Error from either endpoint.
///
/// Every variant is transient: the caller logs it, surfaces a non-blocking
/// indicator, and carries on.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
}

/// One measurement from the metrics endpoint.
///
/// Any field may be absent; absent readings are folded in as zero by the
/// state layer. Unknown fields (the endpoint also reports a timestamp) are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    pub download_speed: Option<f64>,
    pub upload_speed: Option<f64>,
    pub ping: Option<f64>,
}

/// Recommendation set from the optimization endpoint.
///
/// `suggestions` defaults to empty when missing; the endpoint's
/// `network_stats` and `optimization_log` extras are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeResponse {
    pub efficiency: Option<f64>,
    pub stability: Option<String>,
    pub signal: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// The two HTTP collaborators the engine depends on.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// Fetches one measurement from the metrics endpoint.
    async fn fetch_stats(&self) -> Result<StatsResponse, ApiError>;

    /// Triggers a one-shot optimization run and returns its recommendation.
    async fn optimize(&self) -> Result<OptimizeResponse, ApiError>;
}

/// reqwest-backed client for both endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// The URL is normalized: a missing scheme becomes `http://` and a
    /// trailing slash is trimmed, so `127.0.0.1:8000` works as-is.
    pub fn new(base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed
        } else {
            format!("http://{trimmed}")
        };

        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MetricsApi for ApiClient {
    async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
        let response = self.client.get(self.url(STATS_PATH)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    async fn optimize(&self) -> Result<OptimizeResponse, ApiError> {
        let response = self.client.post(self.url(OPTIMIZE_PATH)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }
}
