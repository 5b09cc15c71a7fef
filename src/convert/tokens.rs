//! Token list normalization.
//!
//! Token endpoints answer with one of four envelopes:
//!
//! - a bare array: `[ {...}, ... ]`
//! - `{ "tokens": [...] }`
//! - `{ "results": [...] }`
//! - `{ "data": [...] }`
//!
//! [`TokenPayload::decode`] tries them in that order (first match wins; a
//! field only matches when it holds an array). Anything else decodes to
//! [`TokenPayload::Empty`]. Each element is then mapped onto a
//! [`TokenRecord`] with per-field aliases and defaults.

use serde_json::Value;

use super::image::resolve_image_url;
use super::{scalar_text, text_field};
use crate::profile::CollectionProfile;
use crate::types::{TokenRecord, TokenTrait};

/// Recognised token list envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenPayload<'a> {
    Array(&'a [Value]),
    Tokens(&'a [Value]),
    Results(&'a [Value]),
    Data(&'a [Value]),
    /// No recognised shape.
    Empty,
}

impl<'a> TokenPayload<'a> {
    /// Detect the envelope.
    pub fn decode(value: &'a Value) -> Self {
        if let Value::Array(items) = value {
            return TokenPayload::Array(items);
        }
        let field = |name: &str| value.get(name).and_then(Value::as_array);
        if let Some(items) = field("tokens") {
            TokenPayload::Tokens(items)
        } else if let Some(items) = field("results") {
            TokenPayload::Results(items)
        } else if let Some(items) = field("data") {
            TokenPayload::Data(items)
        } else {
            TokenPayload::Empty
        }
    }

    /// The raw elements (empty for [`TokenPayload::Empty`]).
    pub fn items(&self) -> &'a [Value] {
        match self {
            TokenPayload::Array(items)
            | TokenPayload::Tokens(items)
            | TokenPayload::Results(items)
            | TokenPayload::Data(items) => items,
            TokenPayload::Empty => &[],
        }
    }
}

/// Normalize a token list payload.
///
/// Elements without any usable id are skipped: both the permalink and the
/// default name are derived from it.
pub fn normalize_tokens(value: &Value, profile: &CollectionProfile) -> Vec<TokenRecord> {
    TokenPayload::decode(value)
        .items()
        .iter()
        .filter_map(|item| normalize_token(item, profile))
        .collect()
}

fn normalize_token(item: &Value, profile: &CollectionProfile) -> Option<TokenRecord> {
    let id = text_field(item, &["id", "token_id", "tokenId"])?;
    let metadata = item.get("metadata").unwrap_or(&Value::Null);

    let name = text_field(item, &["name"])
        .or_else(|| text_field(metadata, &["name"]))
        .unwrap_or_else(|| profile.default_token_name(&id));

    let raw_image = text_field(item, &["image"])
        .or_else(|| text_field(metadata, &["image"]))
        .or_else(|| text_field(item, &["imageUrl"]));

    let description = text_field(item, &["description"])
        .or_else(|| text_field(metadata, &["description"]))
        .unwrap_or_default();

    let rarity = ["rarity_rank", "rank"]
        .iter()
        .find_map(|key| item.get(*key).and_then(rank));

    let owner = text_field(item, &["owner", "current_owner"]);

    Some(TokenRecord {
        image: resolve_image_url(raw_image.as_deref(), profile),
        permalink: profile.permalink(&id),
        name,
        description,
        price: text_field(item, &["price", "last_sale_price"]),
        rarity,
        traits: traits(item),
        owner,
        id,
    })
}

/// A rank as an unsigned integer, from a number or a numeric string.
fn rank(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `traits` or `attributes`, each `{trait_type|key|name, value}`.
fn traits(item: &Value) -> Vec<TokenTrait> {
    let list = ["traits", "attributes"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_array));
    let Some(list) = list else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|entry| {
            let trait_type = text_field(entry, &["trait_type", "key", "name"])?;
            let value = entry.get("value").and_then(scalar_text)?;
            Some(TokenTrait::new(trait_type, value))
        })
        .collect()
}
