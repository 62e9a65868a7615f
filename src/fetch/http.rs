//! HTTP resource fetching.
//!
//! Provides a blocking HTTP client that returns raw response bytes and
//! separates transport failures from unsuccessful responses.

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches resources over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

/// Raw response from a GET request.
#[derive(Debug)]
pub struct FetchResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build("rescache", timeout)
    }

    /// Create a fetcher with a custom user agent and timeout.
    pub fn build(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CacheError::Other(anyhow::Error::new(e).context("Failed to build HTTP client"))
            })?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET request and return status and body without judging
    /// the status.
    pub fn get(&self, target: &str) -> Result<FetchResponse> {
        let url = parse_target(target)?;
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.bytes()?.to_vec();

        Ok(FetchResponse { status, body })
    }

    /// Fetch a resource, failing on any non-success status.
    pub fn fetch(&self, target: &str) -> Result<Vec<u8>> {
        let response = self.get(target)?;

        if !response.is_success() {
            return Err(CacheError::BadResponse {
                target: target.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

fn parse_target(target: &str) -> Result<Url> {
    let url = Url::parse(target).map_err(|e| CacheError::InvalidTarget {
        target: target.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CacheError::InvalidTarget {
            target: target.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
