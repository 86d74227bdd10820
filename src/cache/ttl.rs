//! TTL Cache Module
//!
//! Implements an unbounded key-value store where each entry carries its own
//! absolute expiry instant. Expired entries are invisible to readers even
//! before they are physically purged: reads remove an expired entry lazily,
//! and [`TtlCache::cleanup_expired`] performs an explicit full sweep.
//!
//! Backing storage is a concurrent map with per-key atomicity; there is no
//! cache-wide lock, and the cache never spawns its own sweep task (see the
//! tasks module for caller-controlled scheduling).

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tracing::debug;

use crate::cache::{Cache, CacheStats, TtlEntry};

// == TTL Cache ==
/// Unbounded cache with per-entry time-to-live expiry.
///
/// Entry lifecycle: active, then expired-but-present once its instant
/// passes, then absent once a read or a sweep removes it. An insert on the
/// same key starts a new lifecycle rather than reviving the old entry.
pub struct TtlCache<K, V> {
    /// Backing storage; may hold not-yet-swept expired entries
    entries: DashMap<K, TtlEntry<V>>,
    /// TTL applied when the caller does not supply one
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates a new TtlCache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
        }
    }

    /// Returns the cache-wide default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Insert With TTL ==
    /// Stores a value expiring `ttl` from now, replacing any existing entry.
    ///
    /// A zero TTL is accepted and makes the entry expired on its next
    /// access.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, TtlEntry::new(value, ttl));
    }

    // == Cleanup Expired ==
    /// Removes every entry whose expiry instant has passed.
    ///
    /// Intended to be invoked periodically by an external scheduler.
    /// Idempotent and safe to call at any frequency; racing reads may
    /// remove the same key first, which is harmless.
    ///
    /// # Returns
    /// The number of entries removed by this sweep.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            self.expirations.fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, "ttl cleanup removed expired entries");
        }
        removed
    }

    /// Returns a snapshot of current cache statistics.
    ///
    /// `total_entries` carries the same weak guarantee as `len()`.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: 0,
            expirations: self.expirations.load(Ordering::Relaxed),
            total_entries: self.entries.len(),
        }
    }

    /// Removes `key` if its entry is still expired, counting the removal.
    ///
    /// The freshness re-check keeps a racing insert for the same key from
    /// being discarded.
    fn remove_expired(&self, key: &K) {
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            self.expirations.fetch_add(1, Ordering::Relaxed);
            debug!("removed expired entry on access");
        }
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Retrieves a live value. Finding an expired entry removes it as a
    /// side effect and reports a miss. Hits do not update any metadata.
    fn get(&self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if !entry.is_expired() {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };

        // The read guard is released before taking the removal path
        if expired {
            self.remove_expired(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores a value with the default TTL, replacing any existing entry.
    /// Never evicts due to size.
    fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    fn remove(&self, key: &K) {
        self.entries.remove(key);
    }

    fn clear(&self) {
        self.entries.clear();
        debug!("ttl cache cleared");
    }

    /// Returns the count of entries in backing storage, which may include
    /// not-yet-swept expired entries. This weak guarantee is deliberate;
    /// only reads and sweeps decide visibility.
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Expiry-aware presence check. Finding an expired entry removes it,
    /// same as `get`, but the value is never cloned.
    fn contains_key(&self, key: &K) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return false,
        };
        if !expired {
            return true;
        }
        self.remove_expired(key);
        false
    }
}
