//! # Record Fetching
//!
//! The read-side capability the orchestrator depends on: given a path
//! relative to some FIRE API base, return the raw JSON the endpoint served.
//! The capability is a trait so orchestration logic is testable against an
//! in-memory fetcher; [`HttpRecordFetcher`] is the production implementation
//! over `reqwest`.
//!
//! Retries are NOT built in — a failed fetch surfaces to the caller, who
//! owns the retry policy. The only timeout is the HTTP client's per-request
//! timeout, configurable via [`FetcherConfig`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Errors from fetching a FIRE record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error calling {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    /// The endpoint returned a non-2xx status.
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    /// The response body was not valid JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },
}

/// Read access to FIRE endpoints, keyed by path relative to a base URL.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetch the JSON payload at `path` (e.g. `/api/fire/entities/ent-001`).
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;
}

/// Configuration for the HTTP record fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL of the FIRE API (e.g. `https://fire.example.org`).
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl FetcherConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

/// HTTP implementation of [`RecordFetcher`] over a shared `reqwest::Client`.
///
/// `Send + Sync`; designed to be shared via `Arc` across async tasks.
#[derive(Debug)]
pub struct HttpRecordFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::ClientBuild {
                reason: e.to_string(),
            })?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl RecordFetcher for HttpRecordFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching record");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}
