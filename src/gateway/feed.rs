//! NftFeed - the collection data service.
//!
//! Answers every query with something renderable:
//!
//! ```text
//! query ──► cache (valid?) ──yes──► cached value
//!              │ no
//!              ▼
//!        candidate endpoints, in order (each with its own retry budget)
//!              │ first success          │ all failed
//!              ▼                        ▼
//!        normalize, cache, return   fallback data (not cached)
//! ```
//!
//! Cycling token queries take a different path: they draw a random sample
//! from the built-in pool without waiting on the network, and leave a
//! background task to refresh the live token list for later calls.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::cache::QueryCache;
use crate::convert::{normalize_tokens, summary_from_value};
use crate::profile::CollectionProfile;
use crate::providers::{EndpointFetcher, FetchOptions, first_success};
use crate::registry::FallbackData;
use crate::telemetry;
use crate::traits::CollectionSource;
use crate::types::{CollectionStats, CollectionSummary, QueryKey, TokenRecord};
use crate::{NftFeedBuilder, Result};

/// Collection data service.
///
/// Cheap to clone: all state is shared. Query methods never fail and
/// never return an empty result because of a network problem.
#[derive(Clone)]
pub struct NftFeed {
    fetcher: Arc<dyn EndpointFetcher>,
    cache: Arc<QueryCache>,
    profile: Arc<CollectionProfile>,
    fallback: Arc<FallbackData>,
    options: Arc<FetchOptions>,
    refreshing: Arc<Mutex<HashSet<usize>>>,
}

impl NftFeed {
    /// Create a new builder for configuring the service.
    pub fn builder() -> NftFeedBuilder {
        NftFeedBuilder::new()
    }

    pub(crate) fn new(
        fetcher: Arc<dyn EndpointFetcher>,
        cache: Arc<QueryCache>,
        profile: CollectionProfile,
        fallback: Arc<FallbackData>,
        options: FetchOptions,
    ) -> Self {
        Self {
            fetcher,
            cache,
            profile: Arc::new(profile),
            fallback,
            options: Arc::new(options),
            refreshing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The cache this service reads and writes.
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// The collection profile in use.
    pub fn profile(&self) -> &CollectionProfile {
        &self.profile
    }

    /// The fallback data in use.
    pub fn fallback(&self) -> &FallbackData {
        &self.fallback
    }

    /// Collection overview: cached, live, or fallback.
    #[instrument(skip(self), fields(query = "collection"))]
    pub async fn get_collection_data(&self) -> CollectionSummary {
        if let Some(summary) = self.cache.get_collection() {
            debug!("collection served from cache");
            return summary;
        }

        let urls = self.profile.collection_urls();
        match self.resolve(QueryKey::Collection, &urls).await {
            Ok((url, body)) => {
                let summary = summary_from_value(&body, &self.profile);
                self.cache.insert_collection(summary.clone());
                info!(url, "collection data refreshed");
                summary
            }
            Err(e) => {
                metrics::counter!(telemetry::FALLBACKS_TOTAL, "query" => "collection")
                    .increment(1);
                warn!(error = %e, "using fallback collection data");
                self.fallback.collection_summary(&self.profile)
            }
        }
    }

    /// Display-ready collection figures.
    pub async fn get_collection_stats(&self) -> CollectionStats {
        CollectionStats::from(&self.get_collection_data().await)
    }

    /// Up to `limit` tokens.
    ///
    /// With `cycling`, returns a random sample without touching the network
    /// and schedules a background refresh of the live list. Without it,
    /// resolves the live list (or the first `limit` fallback tokens).
    #[instrument(skip(self), fields(query = "tokens"))]
    pub async fn get_collection_nfts(&self, limit: usize, cycling: bool) -> Vec<TokenRecord> {
        if cycling {
            self.sample_tokens(limit)
        } else {
            self.token_list(limit).await
        }
    }

    async fn token_list(&self, limit: usize) -> Vec<TokenRecord> {
        let key = QueryKey::TokenList { limit };
        if let Some(tokens) = self.cache.get_tokens(&key) {
            debug!(limit, "token list served from cache");
            return tokens;
        }

        match self.fetch_token_list(limit).await {
            Ok(tokens) => tokens,
            Err(e) => {
                metrics::counter!(telemetry::FALLBACKS_TOTAL, "query" => "token_list")
                    .increment(1);
                warn!(limit, error = %e, "using fallback token list");
                self.fallback.first_tokens(limit)
            }
        }
    }

    fn sample_tokens(&self, limit: usize) -> Vec<TokenRecord> {
        let key = QueryKey::TokenSample { limit };
        if let Some(tokens) = self.cache.get_tokens(&key) {
            return tokens;
        }

        let sample = shuffled_sample(self.fallback.tokens(), limit);
        debug!(limit, "drew token sample from the built-in pool");

        self.cache.insert_tokens(key, sample.clone());
        self.spawn_refresh(limit);
        sample
    }

    /// Start a background refresh of the live token list for `limit`.
    ///
    /// Never awaited. At most one refresh per limit is in flight; errors
    /// are logged inside the task.
    fn spawn_refresh(&self, limit: usize) {
        {
            let mut refreshing = self.refreshing.lock().unwrap_or_else(PoisonError::into_inner);
            if !refreshing.insert(limit) {
                debug!(limit, "background refresh already running");
                return;
            }
        }

        let feed = self.clone();
        tokio::spawn(async move {
            match feed.fetch_token_list(limit).await {
                Ok(tokens) => {
                    metrics::counter!(telemetry::BACKGROUND_REFRESH_TOTAL, "status" => "ok")
                        .increment(1);
                    info!(limit, count = tokens.len(), "background refresh updated live tokens");
                }
                Err(e) => {
                    metrics::counter!(telemetry::BACKGROUND_REFRESH_TOTAL, "status" => "error")
                        .increment(1);
                    debug!(limit, error = %e, "background refresh found no live source");
                }
            }
            feed.refreshing
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&limit);
        });
    }

    /// Resolve, normalize and cache the live token list.
    async fn fetch_token_list(&self, limit: usize) -> Result<Vec<TokenRecord>> {
        let key = QueryKey::TokenList { limit };
        let urls = self.profile.token_urls(limit);
        let (url, body) = self.resolve(key, &urls).await?;

        let mut tokens = normalize_tokens(&body, &self.profile);
        tokens.truncate(limit);
        debug!(url, count = tokens.len(), "normalized token list");
        self.cache.insert_tokens(key, tokens.clone());
        Ok(tokens)
    }

    async fn resolve(&self, key: QueryKey, urls: &[String]) -> Result<(String, serde_json::Value)> {
        let start = Instant::now();
        let result = first_success(self.fetcher.as_ref(), urls, &self.options, key).await;
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "query" => key.class().as_str())
            .record(start.elapsed().as_secs_f64());
        result
    }
}

/// Uniform shuffle of `pool`, truncated to `limit`.
fn shuffled_sample(pool: &[TokenRecord], limit: usize) -> Vec<TokenRecord> {
    let mut sample = pool.to_vec();
    sample.shuffle(&mut rand::rng());
    sample.truncate(limit);
    sample
}

#[async_trait]
impl CollectionSource for NftFeed {
    async fn get_collection_data(&self) -> CollectionSummary {
        NftFeed::get_collection_data(self).await
    }

    async fn get_collection_nfts(&self, limit: usize, cycling: bool) -> Result<Vec<TokenRecord>> {
        Ok(NftFeed::get_collection_nfts(self, limit, cycling).await)
    }

    async fn get_collection_stats(&self) -> CollectionStats {
        NftFeed::get_collection_stats(self).await
    }
}
