//! Built-in fallback data.
//!
//! When every candidate endpoint fails, the service answers from
//! [`FallbackData`] instead of surfacing an error:
//!
//! - **collection**: a raw collection payload, run through the same
//!   normalization as live data so fallback and live summaries agree
//! - **tokens**: a fixed, ordered pool of canonical token records; also
//!   the pool that rotation samples are drawn from while no live list is
//!   cached
//!
//! The embedded data is compiled in from `fallback.json` and parsed once.

use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::convert::summary_from_value;
use crate::profile::CollectionProfile;
use crate::types::{CollectionSummary, TokenRecord};

/// Static data returned when no live source answers.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackData {
    collection: Value,
    tokens: Vec<TokenRecord>,
}

impl FallbackData {
    /// Build from a raw collection payload and an ordered token pool.
    pub fn new(collection: Value, tokens: Vec<TokenRecord>) -> Self {
        Self { collection, tokens }
    }

    /// The compiled-in data set (shared, parsed on first use).
    pub fn embedded() -> Arc<FallbackData> {
        Arc::clone(&EMBEDDED)
    }

    /// Normalized collection overview.
    pub fn collection_summary(&self, profile: &CollectionProfile) -> CollectionSummary {
        summary_from_value(&self.collection, profile)
    }

    /// The whole token pool, in fixed order.
    pub fn tokens(&self) -> &[TokenRecord] {
        &self.tokens
    }

    /// The first `limit` tokens of the pool, in fixed order.
    pub fn first_tokens(&self, limit: usize) -> Vec<TokenRecord> {
        self.tokens.iter().take(limit).cloned().collect()
    }

    /// Whether an id belongs to the pool.
    pub fn contains(&self, id: &str) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }
}

static EMBEDDED: LazyLock<Arc<FallbackData>> = LazyLock::new(|| {
    match serde_json::from_str::<FallbackData>(EMBEDDED_FALLBACK) {
        Ok(data) => Arc::new(data),
        Err(e) => {
            // Compiled in and tested; an empty set keeps callers working.
            error!(error = %e, "failed to parse embedded fallback data");
            Arc::new(FallbackData::new(Value::Null, Vec::new()))
        }
    }
});

/// Raw JSON fallback data compiled into the binary.
const EMBEDDED_FALLBACK: &str = include_str!("fallback.json");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatValue;

    #[test]
    fn embedded_data_parses() {
        let data: FallbackData = serde_json::from_str(EMBEDDED_FALLBACK).unwrap();
        assert_eq!(data.tokens().len(), 32);
    }

    #[test]
    fn pool_order_is_fixed() {
        let data = FallbackData::embedded();
        let first = data.first_tokens(5);
        let ids: Vec<&str> = first.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "7", "13"]);
        assert_eq!(data.tokens().last().unwrap().id, "2089");
    }

    #[test]
    fn pool_records_are_complete() {
        let data = FallbackData::embedded();
        for t in data.tokens() {
            assert!(t.image.starts_with("https://images.gamma.io/ipfs/"));
            assert!(t.permalink.ends_with(&format!("/items/{}", t.id)));
            assert_eq!(t.name, format!("Bitcoin Pepe #{}", t.id));
            assert_eq!(t.rarity, t.id.parse().ok());
            assert!(t.price.is_none());
        }
    }

    #[test]
    fn first_tokens_clamps_to_pool() {
        assert_eq!(FallbackData::embedded().first_tokens(1000).len(), 32);
        assert!(FallbackData::embedded().first_tokens(0).is_empty());
    }

    #[test]
    fn collection_summary_from_fallback() {
        let s = FallbackData::embedded().collection_summary(&CollectionProfile::default());
        assert_eq!(s.name, "Bitcoin Pepe");
        assert_eq!(s.supply, StatValue::known("2089"));
        assert_eq!(s.floor_price, StatValue::known("TBD"));
        assert_eq!(s.volume, StatValue::known("TBD"));
        assert_eq!(s.owners, StatValue::known("TBD"));
        assert_eq!(s.listed, StatValue::known("0"));
    }
}
