//! Retry configuration and the retrying fetcher decorator.
//!
//! Provides [`RetryConfig`] for controlling retry behaviour and
//! [`RetryingFetcher`], which wraps any [`EndpointFetcher`] with a bounded
//! fixed-delay retry loop. Collection endpoints are unreliable rather than
//! rate limited, so the delay does not grow between attempts.
//!
//! Every call starts a fresh retry budget; nothing is remembered across
//! calls (no circuit breaking).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::traits::{EndpointFetcher, FetchOptions};
use crate::telemetry;
use crate::{FeedError, Result};

/// Configuration for retry behaviour on failed requests.
///
/// ```rust
/// # use nftfeed::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .retries(5)
///     .delay(Duration::from_millis(200));
/// assert_eq!(config.max_attempts(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial request. 0 = no retry. Default: 3.
    pub retries: u32,
    /// Fixed wait before each retry. Default: 1000ms.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            retries: 0,
            ..Self::default()
        }
    }

    /// Set the number of retries after the initial request.
    pub fn retries(mut self, n: u32) -> Self {
        self.retries = n;
        self
    }

    /// Set the fixed delay between attempts.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total attempts including the initial request.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

// ============================================================================
// Shared retry helper
// ============================================================================

/// Execute a request with a bounded fixed-delay retry loop.
///
/// `retries_remaining` counts down on each transient failure; when it is
/// exhausted the last error is wrapped in [`FeedError::RetriesExhausted`].
/// Non-transient errors are returned immediately without retry.
pub(crate) async fn with_retry<F, Fut, T>(
    delay: Duration,
    retries: u32,
    url: &str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries_remaining = retries;
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match f().await {
            Ok(value) => {
                metrics::counter!(telemetry::FETCH_ATTEMPTS_TOTAL, "status" => "ok").increment(1);
                return Ok(value);
            }
            Err(e) if e.is_transient() => {
                metrics::counter!(telemetry::FETCH_ATTEMPTS_TOTAL, "status" => "error")
                    .increment(1);
                if retries_remaining == 0 {
                    return Err(FeedError::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                        source: Box::new(e),
                    });
                }
                warn!(
                    url,
                    attempt = attempts,
                    retries_remaining,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "fetch failed, retrying"
                );
                metrics::counter!(telemetry::RETRIES_TOTAL).increment(1);
                tokio::time::sleep(delay).await;
                retries_remaining -= 1;
            }
            Err(e) => {
                metrics::counter!(telemetry::FETCH_ATTEMPTS_TOTAL, "status" => "error")
                    .increment(1);
                return Err(e);
            }
        }
    }
}

// ============================================================================
// RetryingFetcher
// ============================================================================

/// Decorator that wraps an [`EndpointFetcher`] with retry logic.
///
/// On transient errors (as classified by [`FeedError::is_transient()`]),
/// waits `config.delay` and tries again, up to `config.retries` times.
pub struct RetryingFetcher {
    inner: Arc<dyn EndpointFetcher>,
    config: RetryConfig,
}

impl RetryingFetcher {
    /// Wrap a fetcher with retry logic.
    pub fn new(inner: Arc<dyn EndpointFetcher>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The retry configuration in effect.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Fetch with an explicit retry budget instead of the configured one.
    pub async fn fetch_with_retries(
        &self,
        url: &str,
        options: &FetchOptions,
        retries_remaining: u32,
    ) -> Result<Value> {
        with_retry(self.config.delay, retries_remaining, url, || {
            self.inner.fetch(url, options)
        })
        .await
    }
}

#[async_trait]
impl EndpointFetcher for RetryingFetcher {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<Value> {
        self.fetch_with_retries(url, options, self.config.retries)
            .await
    }
}
