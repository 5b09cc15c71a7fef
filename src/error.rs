//! nftfeed error types

/// nftfeed error types
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The fetcher spent its whole retry budget on one URL.
    /// Carries the cause of the final attempt.
    #[error("{url}: gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FeedError>,
    },

    /// Every candidate endpoint for a query failed. The service substitutes
    /// fallback data when it sees this; it never reaches the caller.
    #[error("all {candidates} endpoints failed for {query}")]
    AllEndpointsFailed { query: String, candidates: usize },
}

impl FeedError {
    /// Whether the retry loop should try this request again.
    ///
    /// Collection endpoints are unreliable rather than strict, so every
    /// transport, status and body failure counts as transient. Errors that
    /// come from our own input or configuration never do.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(_) | FeedError::Status { .. } | FeedError::Json(_) => true,
            FeedError::RetriesExhausted { source, .. } => source.is_transient(),
            FeedError::InvalidInput(_)
            | FeedError::Configuration(_)
            | FeedError::AllEndpointsFailed { .. } => false,
        }
    }

    /// HTTP status of the underlying failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status { status, .. } => Some(*status),
            FeedError::RetriesExhausted { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for nftfeed operations
pub type Result<T> = std::result::Result<T, FeedError>;
