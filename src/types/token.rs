//! Canonical token record produced by normalization.

use serde::{Deserialize, Serialize};

/// One trait (attribute) of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenTrait {
    pub trait_type: String,
    pub value: String,
}

impl TokenTrait {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// A single token in canonical shape, whatever provider it came from.
///
/// `image` is always an absolute URL, a `data:` URI, or the local
/// placeholder path. It is never empty and never an `ipfs://` / `ar://`
/// URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token id, stable across providers.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Resolved image URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Last known price, verbatim from the provider.
    #[serde(default)]
    pub price: Option<String>,
    /// Rarity rank (1 = rarest).
    #[serde(default)]
    pub rarity: Option<u64>,
    #[serde(default)]
    pub traits: Vec<TokenTrait>,
    /// Current owner address.
    #[serde(default)]
    pub owner: Option<String>,
    /// Marketplace page for this token.
    pub permalink: String,
}
