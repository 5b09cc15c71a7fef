//! Collection-level figures: supply, floor, volume, holders, listings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display sentinel for a figure no source reported.
pub const UNKNOWN_STAT: &str = "N/A";

/// A best-effort collection figure.
///
/// Providers report these as strings ("2089", "TBD") or numbers; both are
/// kept verbatim as text. Absent figures are [`StatValue::Unknown`] rather
/// than an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum StatValue {
    Known(String),
    #[default]
    Unknown,
}

impl StatValue {
    /// Wrap a reported value.
    pub fn known(value: impl Into<String>) -> Self {
        StatValue::Known(value.into())
    }

    /// Whether a source reported this figure.
    pub fn is_known(&self) -> bool {
        matches!(self, StatValue::Known(_))
    }

    /// The reported text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatValue::Known(s) => Some(s),
            StatValue::Unknown => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Known(s) => f.write_str(s),
            StatValue::Unknown => f.write_str(UNKNOWN_STAT),
        }
    }
}

/// Collection overview as reported by the first endpoint that answered,
/// or by the built-in fallback.
///
/// Immutable once built: a refresh replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection display name.
    pub name: String,
    /// Free-text description (empty when unreported).
    pub description: String,
    /// Total token supply.
    pub supply: StatValue,
    /// Current floor price.
    pub floor_price: StatValue,
    /// Traded volume (24h when the provider distinguishes).
    pub volume: StatValue,
    /// Number of distinct holders.
    pub owners: StatValue,
    /// Number of tokens currently listed for sale.
    pub listed: StatValue,
}

/// Display-ready collection figures, one string per stat card.
///
/// Every field is populated; unknown figures read [`UNKNOWN_STAT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_supply: String,
    pub floor_price: String,
    pub volume: String,
    pub owners: String,
    pub listed: String,
}

impl From<&CollectionSummary> for CollectionStats {
    fn from(summary: &CollectionSummary) -> Self {
        Self {
            total_supply: summary.supply.to_string(),
            floor_price: summary.floor_price.to_string(),
            volume: summary.volume.to_string(),
            owners: summary.owners.to_string(),
            listed: summary.listed.to_string(),
        }
    }
}
