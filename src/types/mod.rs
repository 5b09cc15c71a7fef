//! Public types for the nftfeed API.

mod collection;
mod query;
mod token;

pub use collection::{CollectionStats, CollectionSummary, StatValue, UNKNOWN_STAT};
pub use query::{QueryClass, QueryKey};
pub use token::{TokenRecord, TokenTrait};
