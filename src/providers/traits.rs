//! Endpoint fetcher trait and request options.
//!
//! A fetcher performs ONE request against ONE URL and reports the parsed
//! JSON body. Retry and candidate fallback are layered on top:
//! [`RetryingFetcher`](super::retry::RetryingFetcher) retries a single URL,
//! [`first_success`](super::candidates::first_success) walks the candidate
//! list.
//!
//! # Example
//!
//! ```ignore
//! // A fetcher backed by a fixture map
//! async fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<Value> {
//!     self.fixtures
//!         .get(url)
//!         .cloned()
//!         .ok_or_else(|| FeedError::Status { status: 404, url: url.to_string() })
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::{FeedError, Result};

/// Fetch mode carried with a request.
///
/// Mirrors the browser request modes the collection endpoints were written
/// against. Outside a browser it does not change the request; it is kept
/// so callers can pass it through and so it shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    #[default]
    Cors,
    NoCors,
    SameOrigin,
}

impl RequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Cors => "cors",
            RequestMode::NoCors => "no-cors",
            RequestMode::SameOrigin => "same-origin",
        }
    }
}

/// Per-request options: method, mode and extra headers.
///
/// Extra headers are merged over the defaults (`Accept` and
/// `Content-Type`, both `application/json`); a caller header with the same
/// name (case-insensitive) replaces the default.
///
/// ```rust
/// # use nftfeed::providers::FetchOptions;
/// let options = FetchOptions::new().header("X-Trace", "abc");
/// assert_eq!(options.method, "GET");
/// assert_eq!(options.headers().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// HTTP method. Default: `GET`.
    pub method: String,
    /// Request mode. Default: `cors`.
    pub mode: RequestMode,
    /// Extra headers, applied after the defaults.
    pub extra_headers: Vec<(String, String)>,
}

const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
];

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            mode: RequestMode::default(),
            extra_headers: Vec::new(),
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Override the request mode.
    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add (or replace) a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.extra_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.extra_headers.push((name, value.into()));
        self
    }

    /// Effective header set: defaults, then extra headers on top.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = DEFAULT_HEADERS
            .iter()
            .filter(|(name, _)| {
                !self
                    .extra_headers
                    .iter()
                    .any(|(extra, _)| extra.eq_ignore_ascii_case(name))
            })
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        headers.extend(self.extra_headers.iter().cloned());
        headers
    }

    /// Parsed HTTP method.
    pub fn http_method(&self) -> Result<reqwest::Method> {
        reqwest::Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| FeedError::InvalidInput(format!("invalid HTTP method: {}", self.method)))
    }
}

/// Performs a single request against a single URL.
///
/// Implementations return the parsed JSON body on a 2xx response and an
/// error for anything else (transport failure, non-2xx status, body that
/// is not JSON). They do not retry.
#[async_trait]
pub trait EndpointFetcher: Send + Sync {
    /// Fetcher name for logging/debugging.
    fn name(&self) -> &str;

    /// Issue the request and parse the body.
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<Value>;
}
