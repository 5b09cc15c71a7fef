//! Ordered endpoint candidates with first-success semantics.
//!
//! Each logical query has a list of URL templates in preference order.
//! [`first_success`] tries them strictly one after another; the first
//! candidate that answers wins and the rest are never contacted.
//!
//! ```text
//!   candidate 0 ──► fetcher (with its own retry budget)
//!        │ failed
//!        ▼
//!   candidate 1 ──► fetcher
//!        │ ok ─────────────► raw JSON, stop
//!        ▼
//!   (candidate 2.. never tried)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::{EndpointFetcher, FetchOptions};
use crate::telemetry;
use crate::types::QueryKey;
use crate::{FeedError, Result};

/// Ordered URL templates for one logical query.
///
/// Order encodes preference, not correctness. Templates use `{name}`
/// placeholders that [`render`](Self::render) substitutes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCandidateList {
    templates: Vec<String>,
}

impl EndpointCandidateList {
    /// Build from templates in preference order.
    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
        }
    }

    /// The raw templates.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Substitute `vars` into every template, keeping order.
    pub fn render<V: AsRef<str>>(&self, vars: &[(&str, V)]) -> Vec<String> {
        self.templates
            .iter()
            .map(|t| expand_template(t, vars))
            .collect()
    }
}

/// Replace each `{name}` in `template` with its value. Unknown
/// placeholders are left as-is.
pub fn expand_template<V: AsRef<str>>(template: &str, vars: &[(&str, V)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value.as_ref());
    }
    out
}

/// Try `urls` in order and return the first parsed body.
///
/// Each candidate is handed to `fetcher` once; retries happen inside the
/// fetcher. Returns `(url, body)` of the winning candidate, or
/// [`FeedError::AllEndpointsFailed`] when every candidate failed.
pub async fn first_success(
    fetcher: &dyn EndpointFetcher,
    urls: &[String],
    options: &FetchOptions,
    query: QueryKey,
) -> Result<(String, Value)> {
    let label = query.class().as_str();
    for url in urls {
        debug!(%query, url = url.as_str(), "trying endpoint");
        match fetcher.fetch(url, options).await {
            Ok(body) => {
                debug!(%query, url = url.as_str(), "endpoint answered");
                return Ok((url.clone(), body));
            }
            Err(e) => {
                metrics::counter!(telemetry::ENDPOINT_FAILURES_TOTAL, "query" => label)
                    .increment(1);
                warn!(%query, url = url.as_str(), error = %e, "endpoint failed");
            }
        }
    }
    Err(FeedError::AllEndpointsFailed {
        query: query.to_string(),
        candidates: urls.len(),
    })
}
