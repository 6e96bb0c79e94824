//! Cache Entry Module
//!
//! Defines a cached search result with its insertion time.

use std::time::Duration;

use tokio::time::Instant;

use crate::models::PreviewItem;

// == Cache Entry ==
/// A cached result list for one normalized query.
///
/// Timestamps come from `tokio::time::Instant` so a paused test clock
/// drives expiry the same way the wall clock does.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached results, in server order
    pub results: Vec<PreviewItem>,
    /// When the entry was written
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(results: Vec<PreviewItem>) -> Self {
        Self {
            results,
            inserted_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is fresh only while its age is strictly
    /// below the ttl, so an entry exactly `ttl` old is expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    // == Time To Live ==
    /// Remaining lifetime, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}
