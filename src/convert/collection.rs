//! Collection overview normalization.

use serde_json::Value;

use super::text_field;
use crate::profile::CollectionProfile;
use crate::types::{CollectionSummary, StatValue};

/// Map a collection payload onto a [`CollectionSummary`].
///
/// Field aliases, first present wins:
///
/// | Summary field | Payload keys |
/// |---|---|
/// | `supply` | `total_supply`, `supply` |
/// | `floor_price` | `floor_price`, `floor` |
/// | `volume` | `volume_24h`, `volume` |
/// | `owners` | `unique_owners`, `owners` |
/// | `listed` | `listed_count` |
///
/// Unreported figures become [`StatValue::Unknown`]; a missing name falls
/// back to the profile's collection name.
pub fn summary_from_value(value: &Value, profile: &CollectionProfile) -> CollectionSummary {
    let stat = |keys: &[&str]| {
        text_field(value, keys)
            .map(StatValue::Known)
            .unwrap_or(StatValue::Unknown)
    };

    CollectionSummary {
        name: text_field(value, &["name"]).unwrap_or_else(|| profile.name.clone()),
        description: text_field(value, &["description"]).unwrap_or_default(),
        supply: stat(&["total_supply", "supply"]),
        floor_price: stat(&["floor_price", "floor"]),
        volume: stat(&["volume_24h", "volume"]),
        owners: stat(&["unique_owners", "owners"]),
        listed: stat(&["listed_count"]),
    }
}
