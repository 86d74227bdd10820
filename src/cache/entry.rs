//! Cache Entry Module
//!
//! Defines the structure for TTL cache entries with absolute expiry instants.

use std::time::{Duration, Instant};

// == TTL Entry ==
/// A single TTL cache entry: the stored value plus its expiry instant.
///
/// Expiry uses the monotonic clock (`Instant`), so wall-clock adjustments
/// cannot flip an entry between expired and live.
#[derive(Debug, Clone)]
pub struct TtlEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being visible to readers
    pub expires_at: Instant,
}

impl<V> TtlEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A zero TTL produces an entry that is already expired on its next
    /// access.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is
    /// at or past `expires_at`, so a zero TTL expires immediately.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or zero if the entry has expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
