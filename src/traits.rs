//! Core CollectionSource trait

use async_trait::async_trait;

use crate::{CollectionStats, CollectionSummary, Result, TokenRecord};

/// Where display code gets collection data from.
///
/// [`NftFeed`](crate::NftFeed) is the production implementation and never
/// fails: every path ends in live, cached or fallback data. The token
/// query still returns `Result` so other sources (and test doubles) can
/// report a failure, which the [`RotationDriver`](crate::RotationDriver)
/// turns into an error state.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Collection overview.
    async fn get_collection_data(&self) -> CollectionSummary;

    /// Up to `limit` tokens. With `cycling`, a fresh random sample.
    async fn get_collection_nfts(&self, limit: usize, cycling: bool) -> Result<Vec<TokenRecord>>;

    /// Display-ready figures derived from the overview.
    async fn get_collection_stats(&self) -> CollectionStats {
        CollectionStats::from(&self.get_collection_data().await)
    }
}
