//! Telemetry metric name constants.
//!
//! Centralised metric names for nftfeed operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `nftfeed_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `query`: logical query class: "collection", "token_list", "token_sample"
//! - `status`: outcome: "ok" or "error"

/// HTTP attempts issued by the endpoint fetcher (including retries).
///
/// Labels: `status` ("ok" | "error").
pub const FETCH_ATTEMPTS_TOTAL: &str = "nftfeed_fetch_attempts_total";

/// Retry attempts (not counting the initial request).
pub const RETRIES_TOTAL: &str = "nftfeed_retries_total";

/// Candidate endpoints that failed after exhausting their retry budget.
///
/// Labels: `query`.
pub const ENDPOINT_FAILURES_TOTAL: &str = "nftfeed_endpoint_failures_total";

/// Queries answered from built-in fallback data.
///
/// Labels: `query`.
pub const FALLBACKS_TOTAL: &str = "nftfeed_fallbacks_total";

/// Cache hits.
///
/// Labels: `query`.
pub const CACHE_HITS_TOTAL: &str = "nftfeed_cache_hits_total";

/// Cache misses (absent or expired).
///
/// Labels: `query`.
pub const CACHE_MISSES_TOTAL: &str = "nftfeed_cache_misses_total";

/// Background refresh outcomes.
///
/// Labels: `status` ("ok" | "error").
pub const BACKGROUND_REFRESH_TOTAL: &str = "nftfeed_background_refresh_total";

/// Timer-driven rotations rendered by the rotation driver.
pub const ROTATIONS_TOTAL: &str = "nftfeed_rotations_total";

/// Candidate-list resolution time in seconds.
///
/// Labels: `query`.
pub const REQUEST_DURATION_SECONDS: &str = "nftfeed_request_duration_seconds";
