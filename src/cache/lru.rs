//! LRU Cache Module
//!
//! Implements a bounded key-value store that evicts the least recently
//! touched entry when an insert would exceed capacity.
//!
//! Recency order lives in a doubly linked list threaded through a slab of
//! slots (most recently used at the head, least recently used at the tail),
//! with a HashMap giving O(1) key-to-slot lookup. Both `get` and `insert`
//! run in O(1) amortized time.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};

// == List Node ==
/// One slot of the recency list. `prev` points toward the MRU head,
/// `next` toward the LRU tail.
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Core ==
/// Single-threaded core: slot slab + recency links + key index.
#[derive(Debug)]
struct LruCore<K, V> {
    /// Key -> slot id lookup
    index: HashMap<K, usize>,
    /// Slot slab; freed slots are recycled through `free`
    slots: Vec<Option<Node<K, V>>>,
    /// Recycled slot ids
    free: Vec<usize>,
    /// Most recently used slot
    head: Option<usize>,
    /// Least recently used slot
    tail: Option<usize>,
    /// Maximum number of entries
    capacity: usize,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
            stats: CacheStats::new(),
        }
    }

    // == List Maintenance ==
    /// Unlinks a slot from the recency list without freeing it.
    fn detach(&mut self, id: usize) {
        let (prev, next) = match self.slots[id].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slots[id].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links a detached slot in at the MRU head.
    fn push_front(&mut self, id: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[id].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.slots[h].as_mut() {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    // == Slab Maintenance ==
    fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) -> Option<Node<K, V>> {
        let node = self.slots[id].take();
        if node.is_some() {
            self.free.push(id);
        }
        node
    }

    // == Operations ==
    fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        match self.index.get(key).copied() {
            Some(id) => {
                self.detach(id);
                self.push_front(id);
                self.stats.record_hit();
                self.slots[id].as_ref().map(|node| node.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn insert(&mut self, key: K, value: V) {
        // Overwrite: replace the value and promote to MRU
        if let Some(&id) = self.index.get(&key) {
            if let Some(node) = self.slots[id].as_mut() {
                node.value = value;
            }
            self.detach(id);
            self.push_front(id);
            return;
        }

        // New key at capacity: evict the LRU tail first
        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.alloc(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.push_front(id);
    }

    /// Removes and frees the least recently used entry.
    fn evict_lru(&mut self) {
        let Some(tail) = self.tail else { return };
        self.detach(tail);
        if let Some(node) = self.release(tail) {
            self.index.remove(&node.key);
            self.stats.record_eviction();
            debug!(size = self.index.len(), "evicted least recently used entry");
        }
    }

    fn remove(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.detach(id);
            self.release(id);
        }
    }

    fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        debug!("lru cache cleared");
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }
}

// == LRU Cache ==
/// Bounded cache evicting the least recently touched entry.
///
/// Every operation, reads included, updates recency order, so all access is
/// serialized behind one exclusive lock.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<LruCore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new LruCache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: Mutex::new(LruCore::new(capacity)),
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
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Retrieves a value and marks it most recently used. A miss has no
    /// side effect on recency order.
    fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Inserts or replaces a value, marking it most recently used. Inserting
    /// a new key at capacity evicts the least recently used entry first.
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
        self.inner.lock().index.len()
    }

    /// Presence check; does not affect recency order.
    fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().index.contains_key(key)
    }
}
