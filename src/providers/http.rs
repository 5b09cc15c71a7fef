//! HTTP endpoint fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::traits::{EndpointFetcher, FetchOptions};
use crate::{FeedError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetcher that issues real HTTP requests.
///
/// Sends the merged [`FetchOptions`] headers plus a `User-Agent`, requires
/// a 2xx status, and parses the body as JSON. No authentication.
#[derive(Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::user_agent())
            .build()
            .expect("failed to build HTTP client");

        Self { http }
    }

    /// Wrap an existing client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EndpointFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<Value> {
        let mut request = self.http.request(options.http_method()?, url);
        for (name, value) in options.headers() {
            request = request.header(name, value);
        }

        debug!(url, method = %options.method, mode = options.mode.as_str(), "fetching");
        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;
        let value = serde_json::from_str(&body)?;

        debug!(url, bytes = body.len(), "fetched");
        Ok(value)
    }
}
