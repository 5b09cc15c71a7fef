//! Builder for configuring feed instances

use std::sync::Arc;
use std::time::Duration;

use super::NftFeed;
use crate::cache::{QueryCache, TtlPolicy};
use crate::profile::CollectionProfile;
use crate::providers::{EndpointFetcher, FetchOptions, HttpFetcher, RetryConfig, RetryingFetcher};
use crate::registry::FallbackData;
use crate::{FeedError, Result};

/// Builder for configuring [`NftFeed`] instances.
///
/// Every setting has a working default, so `NftFeed::builder().build()`
/// yields a service for the default collection over real HTTP.
pub struct NftFeedBuilder {
    profile: CollectionProfile,
    retry: RetryConfig,
    ttl: TtlPolicy,
    max_cache_entries: Option<u64>,
    timeout: Option<Duration>,
    fetch_options: FetchOptions,
    fetcher: Option<Arc<dyn EndpointFetcher>>,
    cache: Option<Arc<QueryCache>>,
    fallback: Option<Arc<FallbackData>>,
}

impl NftFeedBuilder {
    pub fn new() -> Self {
        Self {
            profile: CollectionProfile::default(),
            retry: RetryConfig::default(),
            ttl: TtlPolicy::default(),
            max_cache_entries: None,
            timeout: None,
            fetch_options: FetchOptions::default(),
            fetcher: None,
            cache: None,
            fallback: None,
        }
    }

    /// Collection identity, hosts and endpoint candidates.
    pub fn collection(mut self, profile: CollectionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Per-URL retry budget (default: 3 retries, 1000 ms apart).
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Cache lifetimes per query class.
    pub fn ttl(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    /// Upper bound on cached entries.
    pub fn max_cache_entries(mut self, max: u64) -> Self {
        self.max_cache_entries = Some(max);
        self
    }

    /// Per-request timeout for the default HTTP fetcher.
    ///
    /// Ignored when a custom fetcher is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Request method, mode and extra headers sent to every endpoint.
    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Replace the transport. The retry policy still wraps it.
    pub fn fetcher(mut self, fetcher: Arc<dyn EndpointFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Share an existing cache instead of creating one.
    ///
    /// The cache keeps its own TTL policy; [`ttl`](Self::ttl) is ignored.
    pub fn cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the compiled-in fallback data.
    pub fn fallback(mut self, fallback: Arc<FallbackData>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<NftFeed> {
        if self.profile.collection_endpoints.is_empty() {
            return Err(FeedError::Configuration(
                "no collection endpoints configured".into(),
            ));
        }
        if self.profile.token_endpoints.is_empty() {
            return Err(FeedError::Configuration(
                "no token endpoints configured".into(),
            ));
        }
        // Reject a bad method here rather than on every request
        self.fetch_options.http_method()?;

        let transport = self.fetcher.unwrap_or_else(|| {
            let http = match self.timeout {
                Some(timeout) => HttpFetcher::with_timeout(timeout),
                None => HttpFetcher::new(),
            };
            Arc::new(http)
        });
        let fetcher: Arc<dyn EndpointFetcher> =
            Arc::new(RetryingFetcher::new(transport, self.retry));

        let cache = self.cache.unwrap_or_else(|| {
            Arc::new(match self.max_cache_entries {
                Some(max) => QueryCache::with_max_entries(self.ttl, max),
                None => QueryCache::new(self.ttl),
            })
        });

        let fallback = self.fallback.unwrap_or_else(FallbackData::embedded);

        Ok(NftFeed::new(
            fetcher,
            cache,
            self.profile,
            fallback,
            self.fetch_options,
        ))
    }
}

impl Default for NftFeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::EndpointCandidateList;

    #[test]
    fn defaults_build() {
        let feed = NftFeedBuilder::new().build().unwrap();
        assert_eq!(feed.profile().name, "Bitcoin Pepe");
        assert_eq!(feed.fallback().tokens().len(), 32);
    }

    #[test]
    fn empty_collection_endpoints_rejected() {
        let profile = CollectionProfile::default()
            .with_collection_endpoints(EndpointCandidateList::new(Vec::<String>::new()));
        let err = NftFeed::builder().collection(profile).build().err().unwrap();
        assert!(matches!(err, FeedError::Configuration(_)));
    }

    #[test]
    fn empty_token_endpoints_rejected() {
        let profile = CollectionProfile::default()
            .with_token_endpoints(EndpointCandidateList::new(Vec::<String>::new()));
        let err = NftFeed::builder().collection(profile).build().err().unwrap();
        assert!(matches!(err, FeedError::Configuration(_)));
    }

    #[test]
    fn invalid_method_rejected() {
        let err = NftFeed::builder()
            .fetch_options(FetchOptions::new().method("NOT A METHOD"))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, FeedError::InvalidInput(_)));
    }

    #[test]
    fn shared_cache_is_used() {
        let cache = Arc::new(QueryCache::default());
        let feed = NftFeed::builder().cache(cache.clone()).build().unwrap();
        assert!(Arc::ptr_eq(feed.cache(), &cache));
    }
}
