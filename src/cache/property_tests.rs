//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify correctness properties shared by the eviction
//! policies.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::{Cache, LfuCache, LruCache, TtlCache};

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys (non-empty, bounded length)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

/// A sequence element for exercising caches with mixed operations
#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Insert { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn apply<C: Cache<String, String>>(cache: &C, op: CacheOp) {
    match op {
        CacheOp::Insert { key, value } => cache.insert(key, value),
        CacheOp::Get { key } => {
            cache.get(&key);
        }
        CacheOp::Remove { key } => cache.remove(&key),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any key-value pair, storing and immediately retrieving it (before
    // any eviction or expiry condition is met) returns exactly the value
    // last written for that key.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let lru = LruCache::new(TEST_CAPACITY).unwrap();
        let lfu = LfuCache::new(TEST_CAPACITY).unwrap();
        let ttl = TtlCache::new(TEST_TTL);

        lru.insert(key.clone(), value.clone());
        lfu.insert(key.clone(), value.clone());
        ttl.insert(key.clone(), value.clone());

        prop_assert_eq!(lru.get(&key), Some(value.clone()));
        prop_assert_eq!(lfu.get(&key), Some(value.clone()));
        prop_assert_eq!(ttl.get(&key), Some(value));
    }

    // Storing V1 then V2 under the same key yields V2, with a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let lru = LruCache::new(TEST_CAPACITY).unwrap();
        let lfu = LfuCache::new(TEST_CAPACITY).unwrap();
        let ttl = TtlCache::new(TEST_TTL);
        let caches: [&dyn Cache<String, String>; 3] = [&lru, &lfu, &ttl];

        for cache in caches {
            cache.insert(key.clone(), value1.clone());
            cache.insert(key.clone(), value2.clone());

            prop_assert_eq!(cache.get(&key), Some(value2.clone()));
            prop_assert_eq!(cache.len(), 1);
        }
    }

    // After a remove, a subsequent get reports absence.
    #[test]
    fn prop_remove_removes_entry(key in key_strategy(), value in value_strategy()) {
        let lru = LruCache::new(TEST_CAPACITY).unwrap();
        let lfu = LfuCache::new(TEST_CAPACITY).unwrap();
        let ttl = TtlCache::new(TEST_TTL);
        let caches: [&dyn Cache<String, String>; 3] = [&lru, &lfu, &ttl];

        for cache in caches {
            cache.insert(key.clone(), value.clone());
            prop_assert!(cache.contains_key(&key));

            cache.remove(&key);

            prop_assert_eq!(cache.get(&key), None);
            prop_assert!(!cache.contains_key(&key));
        }
    }

    // For any sequence of inserts, the bounded caches never exceed capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let capacity = 50;
        let lru = LruCache::new(capacity).unwrap();
        let lfu = LfuCache::new(capacity).unwrap();

        for (key, value) in entries {
            lru.insert(key.clone(), value.clone());
            lfu.insert(key, value);

            prop_assert!(lru.len() <= capacity, "LRU size {} exceeds capacity", lru.len());
            prop_assert!(lfu.len() <= capacity, "LFU size {} exceeds capacity", lfu.len());
        }
    }

    // For any operation sequence, hit/miss statistics reflect exactly the
    // get outcomes that occurred.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let lru = LruCache::new(TEST_CAPACITY).unwrap();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => lru.insert(key, value),
                CacheOp::Get { key } => match lru.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { key } => lru.remove(&key),
            }
        }

        let stats = lru.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, lru.len(), "Total entries mismatch");
    }

    // The LFU entry map and priority index stay in sync across arbitrary
    // operation sequences (a stale priority slot would break eviction).
    #[test]
    fn prop_lfu_priority_index_consistency(
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let lfu = LfuCache::new(5).unwrap();

        for op in ops {
            apply(&lfu, op);
            prop_assert!(lfu.len() <= 5);
        }

        lfu.assert_invariants();
    }

    // Mixed operations never drive a cache into an inconsistent size.
    #[test]
    fn prop_mixed_ops_keep_sizes_sane(
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let lru = LruCache::new(10).unwrap();
        let ttl = TtlCache::new(TEST_TTL);

        for op in ops {
            apply(&lru, op.clone());
            apply(&ttl, op);

            prop_assert!(lru.len() <= 10);
        }
    }
}

// Zero-TTL entries are deterministic to test: expired on the very next access.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    #[test]
    fn prop_zero_ttl_expires_immediately(key in key_strategy(), value in value_strategy()) {
        let ttl: TtlCache<String, String> = TtlCache::new(TEST_TTL);

        ttl.insert_with_ttl(key.clone(), value, Duration::ZERO);

        prop_assert_eq!(ttl.get(&key), None);
        prop_assert!(!ttl.contains_key(&key));
        prop_assert_eq!(ttl.len(), 0);
    }
}
