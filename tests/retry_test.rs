use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nftfeed::{
    EndpointFetcher, FeedError, FetchOptions, HttpFetcher, Result, RetryConfig, RetryingFetcher,
};

/// Mock fetcher that fails N times then succeeds.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> FeedError,
    total_calls: AtomicU32,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> FeedError) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EndpointFetcher for FailThenSucceed {
    fn name(&self) -> &str {
        "mock-retry"
    }

    async fn fetch(&self, _url: &str, _options: &FetchOptions) -> Result<Value> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok(json!({ "ok": true }))
    }
}

fn server_error() -> FeedError {
    FeedError::Status {
        status: 500,
        url: "http://mock/x".into(),
    }
}

#[tokio::test(start_paused = true)]
async fn retries_on_transient_error_then_succeeds() {
    let inner = Arc::new(FailThenSucceed::new(2, server_error));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::default());

    let result = fetcher.fetch("http://mock/x", &FetchOptions::default()).await;

    assert_eq!(result.unwrap(), json!({ "ok": true }));
    assert_eq!(inner.call_count(), 3); // 2 failures + 1 success
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_retry_budget() {
    let inner = Arc::new(FailThenSucceed::new(10, || {
        FeedError::Http("connection reset".into())
    }));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::default());

    let err = fetcher
        .fetch("http://mock/x", &FetchOptions::default())
        .await
        .unwrap_err();

    assert_eq!(inner.call_count(), 4); // initial + 3 retries
    match err {
        FeedError::RetriesExhausted { url, attempts, source } => {
            assert_eq!(url, "http://mock/x");
            assert_eq!(attempts, 4);
            assert!(matches!(*source, FeedError::Http(_)));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn waits_fixed_delay_between_attempts() {
    let inner = Arc::new(FailThenSucceed::new(10, server_error));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::default());

    let start = tokio::time::Instant::now();
    let _ = fetcher.fetch("http://mock/x", &FetchOptions::default()).await;
    let elapsed = start.elapsed();

    // 3 waits of 1000 ms, no growth
    assert!(elapsed >= Duration::from_millis(3000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(3100), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn does_not_retry_permanent_errors() {
    let inner = Arc::new(FailThenSucceed::new(1, || {
        FeedError::InvalidInput("bad method".into())
    }));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::default());

    let err = fetcher
        .fetch("http://mock/x", &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::InvalidInput(_)));
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn disabled_config_makes_single_attempt() {
    let inner = Arc::new(FailThenSucceed::new(1, server_error));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::disabled());

    let err = fetcher
        .fetch("http://mock/x", &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::RetriesExhausted { attempts: 1, .. }));
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn explicit_budget_overrides_config() {
    let inner = Arc::new(FailThenSucceed::new(10, server_error));
    let fetcher = RetryingFetcher::new(inner.clone(), RetryConfig::default());

    let _ = fetcher
        .fetch_with_retries("http://mock/x", &FetchOptions::default(), 1)
        .await;
    assert_eq!(inner.call_count(), 2);
}

#[tokio::test]
async fn each_call_gets_a_fresh_budget() {
    let inner = Arc::new(FailThenSucceed::new(2, server_error));
    let fetcher = RetryingFetcher::new(
        inner.clone(),
        RetryConfig::new().retries(1).delay(Duration::from_millis(1)),
    );
    let options = FetchOptions::default();

    assert_err!(fetcher.fetch("http://mock/x", &options).await);
    assert_ok!(fetcher.fetch("http://mock/x", &options).await);
    assert_eq!(inner.call_count(), 3);
}

// ============================================================================
// Over real HTTP
// ============================================================================

#[tokio::test]
async fn recovers_from_flaky_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/pepe"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/pepe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Bitcoin Pepe" })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(
        Arc::new(HttpFetcher::new()),
        RetryConfig::new().delay(Duration::from_millis(5)),
    );
    let url = format!("{}/collections/pepe", server.uri());
    let body = fetcher.fetch(&url, &FetchOptions::default()).await.unwrap();

    assert_eq!(body["name"], "Bitcoin Pepe");
}

#[tokio::test]
async fn persistent_server_error_exhausts_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(
        Arc::new(HttpFetcher::new()),
        RetryConfig::new().delay(Duration::from_millis(1)),
    );
    let url = format!("{}/anything", server.uri());
    let err = fetcher.fetch(&url, &FetchOptions::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.is_transient());
}
