//! Query Cache Module
//!
//! Bounded, lazily-expiring store of search results keyed by normalized query text.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::config::Config;
use crate::models::PreviewItem;

/// Search cache shared by every orchestrator in the process.
///
/// The lock is never held across an `.await`.
pub type SharedQueryCache = Arc<Mutex<QueryCache>>;

// == Key Normalization ==
/// Normalizes a query into its cache key: trimmed and lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// == Query Cache ==
/// Search result cache with insertion-order overflow eviction and lazy ttl expiry.
#[derive(Debug)]
pub struct QueryCache {
    /// Normalized query -> results
    entries: HashMap<String, CacheEntry>,
    /// Insertion order used to pick the overflow victim
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries kept after a `set`
    capacity: usize,
    /// Lifetime of an entry
    ttl: Duration,
}

impl QueryCache {
    // == Constructor ==
    /// Creates a new QueryCache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of queries kept
    /// * `ttl` - How long a cached result stays usable
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search_cache_capacity, config.cache_ttl())
    }

    /// Wraps the cache for sharing between orchestrators.
    pub fn shared(self) -> SharedQueryCache {
        Arc::new(Mutex::new(self))
    }

    // == Get ==
    /// Returns the cached results for `query` if present and still fresh.
    ///
    /// A stale entry is removed on the spot and reported as absent.
    pub fn get(&mut self, query: &str) -> Option<Vec<PreviewItem>> {
        let key = normalize_query(query);

        let expired = match self.entries.get(&key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.stats.record_hit();
                return Some(entry.results.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(&key);
            self.order.remove(&key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            debug!(query = %key, "search cache entry expired");
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores results for `query`, overwriting any previous entry.
    ///
    /// An overwritten key keeps its insertion position. If the cache then
    /// holds more than `capacity` entries, the single oldest-inserted key
    /// is removed.
    pub fn set(&mut self, query: &str, results: Vec<PreviewItem>) {
        let key = normalize_query(query);

        self.entries.insert(key.clone(), CacheEntry::new(results));
        self.order.insert(&key);

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(query = %evicted, "search cache overflow, evicted oldest entry");
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Contains ==
    /// Checks for a fresh entry without touching statistics or expiring it.
    pub fn contains(&self, query: &str) -> bool {
        self.entries
            .get(&normalize_query(query))
            .map(|entry| !entry.is_expired(self.ttl))
            .unwrap_or(false)
    }

    // == Clear ==
    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current number of entries, including not-yet-collected stale ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
