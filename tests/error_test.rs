use std::error::Error;

use nftfeed::{FeedError, Result};

#[test]
fn test_error_display() {
    let err = FeedError::Status {
        status: 503,
        url: "https://api.gamma.io/collections/x".into(),
    };
    assert_eq!(err.to_string(), "HTTP 503 from https://api.gamma.io/collections/x");
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(FeedError::Configuration("no endpoints".into()))
    }
    assert!(returns_error().is_err());
}

#[test]
fn json_errors_convert_with_question_mark() {
    fn parse(raw: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(raw)?)
    }
    assert!(matches!(parse("{not json"), Err(FeedError::Json(_))));
}

// ============================================================================
// Transient error classification
// ============================================================================

#[test]
fn transient_errors() {
    assert!(FeedError::Http("connection reset".into()).is_transient());
    assert!(
        FeedError::Status {
            status: 404,
            url: "u".into()
        }
        .is_transient()
    );
    assert!(
        FeedError::Status {
            status: 500,
            url: "u".into()
        }
        .is_transient()
    );
    let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    assert!(FeedError::Json(json_err).is_transient());
}

#[test]
fn permanent_errors() {
    assert!(!FeedError::InvalidInput("bad".into()).is_transient());
    assert!(!FeedError::Configuration("bad".into()).is_transient());
    assert!(
        !FeedError::AllEndpointsFailed {
            query: "collection".into(),
            candidates: 5
        }
        .is_transient()
    );
}

#[test]
fn retries_exhausted_carries_cause() {
    let err = FeedError::RetriesExhausted {
        url: "https://x/y".into(),
        attempts: 4,
        source: Box::new(FeedError::Status {
            status: 502,
            url: "https://x/y".into(),
        }),
    };

    assert!(err.is_transient());
    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("gave up after 4 attempts"));
    let source = err.source().expect("cause attached");
    assert!(source.to_string().contains("502"));
}

#[test]
fn status_is_none_for_transport_errors() {
    assert_eq!(FeedError::Http("dns".into()).status(), None);
}
