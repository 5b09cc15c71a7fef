//! Logical query identity and caching class.

use std::fmt;

/// Cache key for one logical query: query type plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Collection overview.
    Collection,
    /// Live token list of `limit` entries, fetched synchronously or by a
    /// background refresh.
    TokenList { limit: usize },
    /// Randomised display sample of `limit` entries.
    TokenSample { limit: usize },
}

impl QueryKey {
    /// The class whose TTL governs this key.
    pub fn class(&self) -> QueryClass {
        match self {
            QueryKey::Collection => QueryClass::Collection,
            QueryKey::TokenList { .. } => QueryClass::TokenList,
            QueryKey::TokenSample { .. } => QueryClass::TokenSample,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Collection => f.write_str("collection"),
            QueryKey::TokenList { limit } => write!(f, "token_list(limit={limit})"),
            QueryKey::TokenSample { limit } => write!(f, "token_sample(limit={limit})"),
        }
    }
}

/// Query class. Each class has its own time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    /// Near-static collection overview (long-lived).
    Collection,
    /// Live token list (long-lived).
    TokenList,
    /// Randomised rotation sample (short-lived).
    TokenSample,
}

impl QueryClass {
    /// Metric / log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryClass::Collection => "collection",
            QueryClass::TokenList => "token_list",
            QueryClass::TokenSample => "token_sample",
        }
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_classes() {
        assert_eq!(QueryKey::Collection.class(), QueryClass::Collection);
        assert_eq!(
            QueryKey::TokenList { limit: 5 }.class(),
            QueryClass::TokenList
        );
        assert_eq!(
            QueryKey::TokenSample { limit: 5 }.class(),
            QueryClass::TokenSample
        );
    }

    #[test]
    fn keys_differ_by_limit() {
        assert_ne!(
            QueryKey::TokenList { limit: 5 },
            QueryKey::TokenList { limit: 6 }
        );
        assert_ne!(
            QueryKey::TokenList { limit: 5 },
            QueryKey::TokenSample { limit: 5 }
        );
    }
}
