//! Cache Module
//!
//! Provides the search result cache with ttl expiry and insertion-order eviction.

mod entry;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::{normalize_query, QueryCache, SharedQueryCache};

// == Public Constants ==
/// Default number of cached queries
pub const DEFAULT_CAPACITY: usize = 50;

/// Default lifetime of a cached result in seconds
pub const DEFAULT_TTL_SECS: u64 = 5 * 60;
