//! Collection data service

mod builder;
mod feed;

pub use builder::NftFeedBuilder;
pub use feed::NftFeed;
