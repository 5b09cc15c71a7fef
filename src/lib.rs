//! nftfeed - Defensive NFT collection data loader
//!
//! This crate fetches collection metadata and token lists from a set of
//! unreliable public endpoints and always answers with something a gallery
//! can render: live data when any endpoint responds, cached data within its
//! TTL, and built-in fallback data otherwise.
//!
//! - [`NftFeed`] - the collection data service (retry, candidate endpoints,
//!   normalization, TTL cache, fallback)
//! - [`RotationDriver`] - periodically re-samples tokens and pushes them to a
//!   [`GallerySink`], with hover pause/resume
//! - [`EndpointFetcher`] - the transport seam ([`HttpFetcher`] by default)
//!
//! # Example
//!
//! ```rust,no_run
//! use nftfeed::NftFeed;
//!
//! #[tokio::main]
//! async fn main() -> nftfeed::Result<()> {
//!     let feed = NftFeed::builder().build()?;
//!
//!     let stats = feed.get_collection_stats().await;
//!     println!("{} tokens, floor {}", stats.total_supply, stats.floor_price);
//!
//!     for token in feed.get_collection_nfts(5, false).await {
//!         println!("{} {}", token.name, token.image);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Rotation Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nftfeed::{NftFeed, RotationConfig, RotationDriver};
//!
//! let feed = Arc::new(NftFeed::builder().build()?);
//! let driver = RotationDriver::new(feed, Arc::new(MySink), RotationConfig::default())?;
//! driver.render(12).await?;
//! // ... later, on pointer events
//! driver.hover_enter();
//! driver.hover_leave();
//! driver.destroy();
//! ```

pub mod cache;
#[cfg(feature = "cli")]
pub mod config;
pub mod convert;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod providers;
pub mod registry;
pub mod rotation;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use cache::{QueryCache, TtlPolicy};
pub use error::{FeedError, Result};
pub use gateway::{NftFeed, NftFeedBuilder};
pub use profile::CollectionProfile;
pub use providers::{
    EndpointCandidateList, EndpointFetcher, FetchOptions, HttpFetcher, RequestMode, RetryConfig,
    RetryingFetcher,
};
pub use registry::FallbackData;
pub use rotation::{GallerySink, RotationConfig, RotationDriver, RotationState, Transition};
pub use traits::CollectionSource;
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    CollectionStats, CollectionSummary, QueryClass, QueryKey, StatValue, TokenRecord, TokenTrait,
    UNKNOWN_STAT,
};
