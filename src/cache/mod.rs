//! Process-lifetime query cache.
//!
//! [`QueryCache`] maps a [`QueryKey`] to a [`CacheEntry`]: the normalized
//! payload plus the instant it was captured. Validity is decided at read
//! time against the TTL of the key's [`QueryClass`] (see [`TtlPolicy`]);
//! there is no background sweep. An expired entry is evicted by the read
//! that finds it.
//!
//! Storage is a bounded moka map so a long-running process cannot grow it
//! without limit. Timestamps use `tokio::time::Instant`, which lets tests
//! move the clock with `tokio::time::pause()` / `advance()`.
//!
//! The cache is an explicit object: build one and hand it to
//! [`NftFeedBuilder::cache()`](crate::NftFeedBuilder::cache), or let the
//! builder create one.

use std::time::Duration;

use tokio::time::Instant;

use crate::telemetry;
use crate::types::{CollectionSummary, QueryClass, QueryKey, TokenRecord};

/// Default maximum number of entries.
const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// Time-to-live per query class.
///
/// ```rust
/// # use nftfeed::TtlPolicy;
/// # use std::time::Duration;
/// let ttl = TtlPolicy::new().token_sample(Duration::from_secs(10));
/// assert_eq!(ttl.collection, Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// Collection overview. Default: 5 minutes.
    pub collection: Duration,
    /// Live token lists. Default: 5 minutes.
    pub token_list: Duration,
    /// Randomised rotation samples. Default: 30 seconds.
    pub token_sample: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            collection: Duration::from_secs(300),
            token_list: Duration::from_secs(300),
            token_sample: Duration::from_secs(30),
        }
    }
}

impl TtlPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, ttl: Duration) -> Self {
        self.collection = ttl;
        self
    }

    pub fn token_list(mut self, ttl: Duration) -> Self {
        self.token_list = ttl;
        self
    }

    pub fn token_sample(mut self, ttl: Duration) -> Self {
        self.token_sample = ttl;
        self
    }

    /// TTL for a query class.
    pub fn ttl(&self, class: QueryClass) -> Duration {
        match class {
            QueryClass::Collection => self.collection,
            QueryClass::TokenList => self.token_list,
            QueryClass::TokenSample => self.token_sample,
        }
    }
}

/// A cached payload and its capture time.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub captured_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Wrap a payload captured now.
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            captured_at: Instant::now(),
        }
    }

    /// Time since capture.
    pub fn age(&self) -> Duration {
        self.captured_at.elapsed()
    }

    /// Valid while `age < ttl`.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Payloads the cache holds.
#[derive(Debug, Clone)]
pub(crate) enum CachedPayload {
    Collection(CollectionSummary),
    Tokens(Vec<TokenRecord>),
}

/// Query cache with per-class TTL checked on read.
pub struct QueryCache {
    entries: moka::sync::Cache<QueryKey, CacheEntry<CachedPayload>>,
    ttl: TtlPolicy,
}

impl QueryCache {
    /// Create an empty cache with the default capacity.
    pub fn new(ttl: TtlPolicy) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache with a custom max capacity.
    pub fn with_max_entries(ttl: TtlPolicy, max: u64) -> Self {
        Self {
            entries: moka::sync::Cache::new(max),
            ttl,
        }
    }

    /// The TTL policy in effect.
    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl
    }

    /// Cached collection overview, if present and within TTL.
    ///
    /// Emits cache hit/miss metrics.
    pub fn get_collection(&self) -> Option<CollectionSummary> {
        match self.lookup(&QueryKey::Collection) {
            Some(CachedPayload::Collection(summary)) => Some(summary),
            _ => None,
        }
    }

    /// Cached token list or sample, if present and within TTL.
    ///
    /// Emits cache hit/miss metrics.
    pub fn get_tokens(&self, key: &QueryKey) -> Option<Vec<TokenRecord>> {
        match self.lookup(key) {
            Some(CachedPayload::Tokens(tokens)) => Some(tokens),
            _ => None,
        }
    }

    /// Whether `key` holds a valid entry. No metrics, no eviction.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_valid(self.ttl.ttl(key.class())))
    }

    /// Store a collection overview captured now.
    pub fn insert_collection(&self, summary: CollectionSummary) {
        self.entries.insert(
            QueryKey::Collection,
            CacheEntry::new(CachedPayload::Collection(summary)),
        );
    }

    /// Store a token list or sample captured now, replacing any entry.
    pub fn insert_tokens(&self, key: QueryKey, tokens: Vec<TokenRecord>) {
        self.entries
            .insert(key, CacheEntry::new(CachedPayload::Tokens(tokens)));
    }

    fn lookup(&self, key: &QueryKey) -> Option<CachedPayload> {
        let label = key.class().as_str();
        let ttl = self.ttl.ttl(key.class());
        match self.entries.get(key) {
            Some(entry) if entry.is_valid(ttl) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "query" => label).increment(1);
                Some(entry.payload)
            }
            Some(_) => {
                self.entries.invalidate(key);
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "query" => label).increment(1);
                None
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "query" => label).increment(1);
                None
            }
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(TtlPolicy::default())
    }
}
