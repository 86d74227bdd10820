//! LFU Cache Module
//!
//! Implements a bounded key-value store that evicts the entry with the
//! lowest access frequency; ties are broken by evicting the least recently
//! touched of the candidates.
//!
//! Entries live in a HashMap for O(1) lookup. Eviction priority is a
//! BTreeMap keyed by `(frequency, last_access)`, where `last_access` is a
//! logical clock ordinal, not wall time. Each resident entry owns exactly
//! one priority slot: every metadata update removes the stale slot and
//! reinserts under the same lock.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};

// == LFU Entry ==
#[derive(Debug)]
struct LfuEntry<V> {
    value: V,
    /// Access count, >= 1 for resident entries and non-decreasing
    frequency: u64,
    /// Logical-clock ordinal of the last touch
    last_access: u64,
}

// == LFU Core ==
#[derive(Debug)]
struct LfuCore<K, V> {
    /// Key -> entry lookup
    entries: HashMap<K, LfuEntry<V>>,
    /// Eviction priority: minimum (frequency, last_access) is first
    order: BTreeMap<(u64, u64), K>,
    /// Logical clock; incremented on every touch
    tick: u64,
    /// Maximum number of entries
    capacity: usize,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> LfuCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            tick: 0,
            capacity,
            stats: CacheStats::new(),
        }
    }

    // == Operations ==
    fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.order.remove(&(entry.frequency, entry.last_access));
                self.tick += 1;
                entry.frequency += 1;
                entry.last_access = self.tick;
                self.order
                    .insert((entry.frequency, entry.last_access), key.clone());
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn insert(&mut self, key: K, value: V) {
        // Update existing key: same bookkeeping as a hit, value replaced
        if let Some(entry) = self.entries.get_mut(&key) {
            self.order.remove(&(entry.frequency, entry.last_access));
            self.tick += 1;
            entry.value = value;
            entry.frequency += 1;
            entry.last_access = self.tick;
            self.order.insert((entry.frequency, entry.last_access), key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lfu();
        }

        self.tick += 1;
        self.order.insert((1, self.tick), key.clone());
        self.entries.insert(
            key,
            LfuEntry {
                value,
                frequency: 1,
                last_access: self.tick,
            },
        );
    }

    /// Removes the entry with minimum (frequency, last_access).
    fn evict_lfu(&mut self) {
        if let Some(((frequency, _), key)) = self.order.pop_first() {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(frequency, "evicted least frequently used entry");
        }
    }

    fn remove(&mut self, key: &K) {
        if let Some(entry) = self.entries.remove(key) {
            self.order.remove(&(entry.frequency, entry.last_access));
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.tick = 0;
        debug!("lfu cache cleared");
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

// == LFU Cache ==
/// Bounded cache evicting the least frequently used entry, with ties broken
/// by recency of access.
///
/// Reads update frequency metadata, so all access is serialized behind one
/// exclusive lock.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    inner: Mutex<LfuCore<K, V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new LfuCache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: Mutex::new(LfuCore::new(capacity)),
        })
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Returns a snapshot of current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Returns the access frequency recorded for `key`, if resident.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().entries.get(key).map(|e| e.frequency)
    }

    /// Panics if the entry map and the priority index disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let core = self.inner.lock();
        assert_eq!(
            core.entries.len(),
            core.order.len(),
            "entry map and priority index have diverged"
        );
        for (key, entry) in &core.entries {
            assert!(entry.frequency >= 1);
            let indexed = core.order.get(&(entry.frequency, entry.last_access));
            assert!(indexed == Some(key), "entry missing from priority index");
        }
    }
}

impl<K, V> Cache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Retrieves a value, incrementing its frequency and refreshing its
    /// logical access timestamp. A miss has no side effect.
    fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Inserts a new entry with frequency 1, or replaces an existing value
    /// with the same frequency bump as a hit. Inserting a new key at
    /// capacity evicts the minimum-(frequency, recency) entry first.
    fn insert(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    fn remove(&self, key: &K) {
        self.inner.lock().remove(key);
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Presence check; does not affect frequency or access timestamps.
    fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().entries.contains_key(key)
    }
}
