//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache's capacity, eviction and lookup rules.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{normalize_query, QueryCache, DEFAULT_CAPACITY, DEFAULT_TTL_SECS};
use crate::models::PreviewItem;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECS);

// == Strategies ==
/// Generates search queries, with surrounding whitespace and mixed case
fn query_strategy() -> impl Strategy<Value = String> {
    "[ ]{0,2}[a-zA-Z]{1,12}[ ]{0,2}".prop_map(|s| s)
}

/// Generates result lists
fn results_strategy() -> impl Strategy<Value = Vec<PreviewItem>> {
    prop::collection::vec(
        (1i64..1025, "[a-z]{3,10}")
            .prop_map(|(id, name)| PreviewItem::new(id, name, format!("https://img/{}.png", id))),
        0..5,
    )
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { query: String, results: Vec<PreviewItem> },
    Get { query: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (query_strategy(), results_strategy())
            .prop_map(|(query, results)| CacheOp::Set { query, results }),
        query_strategy().prop_map(|query| CacheOp::Get { query }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, hit/miss counters match the lookup outcomes.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = QueryCache::new(DEFAULT_CAPACITY, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { query, results } => cache.set(&query, results),
                CacheOp::Get { query } => match cache.get(&query) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
    }

    // A stored result is returned for any spelling that normalizes to the same key.
    #[test]
    fn prop_lookup_is_normalized(query in query_strategy(), results in results_strategy()) {
        let mut cache = QueryCache::new(DEFAULT_CAPACITY, TEST_TTL);

        cache.set(&query, results.clone());

        let shouted = format!("  {}  ", query.to_uppercase());
        prop_assert_eq!(cache.get(&shouted), Some(results));
    }

    // The cache never holds more than its capacity after a set.
    #[test]
    fn prop_capacity_enforcement(queries in prop::collection::vec(query_strategy(), 1..200)) {
        let capacity = 10;
        let mut cache = QueryCache::new(capacity, TEST_TTL);

        for query in queries {
            cache.set(&query, Vec::new());
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Overflow evicts exactly the oldest-inserted key and keeps all others.
    #[test]
    fn prop_overflow_evicts_oldest_inserted(
        queries in prop::collection::vec(query_strategy(), 3..20),
        extra in query_strategy(),
    ) {
        let mut seen = HashSet::new();
        let unique: Vec<String> = queries
            .into_iter()
            .map(|q| normalize_query(&q))
            .filter(|q| seen.insert(q.clone()))
            .collect();
        let extra = normalize_query(&extra);

        prop_assume!(unique.len() >= 2);
        prop_assume!(!unique.contains(&extra));

        let mut cache = QueryCache::new(unique.len(), TEST_TTL);
        for query in &unique {
            cache.set(query, Vec::new());
        }

        // Reads must not influence the victim
        for query in unique.iter().rev() {
            prop_assert!(cache.get(query).is_some());
        }

        cache.set(&extra, Vec::new());

        prop_assert_eq!(cache.len(), unique.len());
        prop_assert!(!cache.contains(&unique[0]), "Oldest key should be evicted");
        prop_assert!(cache.contains(&extra));
        for query in unique.iter().skip(1) {
            prop_assert!(cache.contains(query), "Key '{}' should survive", query);
        }
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut cache = QueryCache::new(0, TEST_TTL);
        cache.set("pika", Vec::new());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_empty_results_are_cached() {
        let mut cache = QueryCache::new(DEFAULT_CAPACITY, TEST_TTL);
        cache.set("zzz", Vec::new());
        assert_eq!(cache.get("zzz"), Some(Vec::new()));
    }
}
