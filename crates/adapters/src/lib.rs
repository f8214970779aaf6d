//! contentflow adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `feed`: JSON file and built-in sample post feeds
//! - `shared`: Thread-safe shared post store
//! - `seed`: Loading a feed into a store

mod feed_json;
mod feed_sample;
mod shared_store;

pub mod seed;

/// Re-exports for post feed adapters
pub mod feed {
    pub use crate::feed_json::JsonFileFeed;
    pub use crate::feed_sample::SampleFeed;
}

/// Re-exports for shared store adapters
pub mod shared {
    pub use crate::shared_store::{SharedPostStore, SharedStoreError};
}
