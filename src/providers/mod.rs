//! Endpoint fetcher: single-URL requests, retry, and candidate fallback.
//!
//! - [`EndpointFetcher`]: one request, one URL, parsed JSON back
//! - [`HttpFetcher`]: the reqwest-backed implementation
//! - [`RetryingFetcher`]: fixed-delay bounded retry decorator
//! - [`EndpointCandidateList`] / [`first_success`]: ordered candidates,
//!   first success wins

pub mod candidates;
pub mod http;
pub mod retry;
pub mod traits;

pub use candidates::{EndpointCandidateList, expand_template, first_success};
pub use http::HttpFetcher;
pub use retry::{RetryConfig, RetryingFetcher};
pub use traits::{EndpointFetcher, FetchOptions, RequestMode};
