//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde_json::{Value, json};

use nftfeed::telemetry;
use nftfeed::{EndpointFetcher, FeedError, FetchOptions, NftFeed, Result, RetryConfig};

// ============================================================================
// Mock fetchers
// ============================================================================

struct Offline;

#[async_trait]
impl EndpointFetcher for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<Value> {
        Err(FeedError::Http(format!("{url}: unreachable")))
    }
}

/// Fails the first request, then answers every request.
struct Flaky {
    calls: AtomicU32,
}

#[async_trait]
impl EndpointFetcher for Flaky {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<Value> {
        if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
            return Err(FeedError::Status {
                status: 502,
                url: url.to_string(),
            });
        }
        Ok(json!({ "name": "Bitcoin Pepe", "total_supply": 2089 }))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn fallback_records_endpoint_failures() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let summary = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let feed = NftFeed::builder()
                    .fetcher(Arc::new(Offline))
                    .retry(RetryConfig::disabled())
                    .build()
                    .unwrap();
                feed.get_collection_data().await
            })
        })
    });
    assert_eq!(summary.name, "Bitcoin Pepe");

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::ENDPOINT_FAILURES_TOTAL), 5);
    assert_eq!(counter_total(&snapshot, telemetry::FETCH_ATTEMPTS_TOTAL), 5);
    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 0);
    assert!(
        has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn retry_and_cache_hit_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let feed = NftFeed::builder()
                    .fetcher(Arc::new(Flaky {
                        calls: AtomicU32::new(0),
                    }))
                    .retry(RetryConfig::new().delay(Duration::from_millis(1)))
                    .build()
                    .unwrap();
                feed.get_collection_data().await;
                feed.get_collection_data().await;
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::FETCH_ATTEMPTS_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::ENDPOINT_FAILURES_TOTAL), 0);
    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL), 0);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let feed = NftFeed::builder()
        .fetcher(Arc::new(Offline))
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();
    let tokens = feed.get_collection_nfts(3, false).await;
    assert_eq!(tokens.len(), 3);
}
