//! Fixed-Window Rate Limiter
//!
//! Maps a caller identifier to a request count inside a time window. The
//! counter lives in a [`TtlCache`] entry whose TTL is the window duration:
//! when the entry expires, the next request starts a fresh window. The
//! limiter holds no clock or timer state of its own.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{Cache, TtlCache};
use crate::config::Config;

/// Namespace prefix for limiter entries in the underlying cache.
const KEY_PREFIX: &str = "rate_limit:";

// == Rate Limiter ==
/// Fixed-window rate limiter keyed by caller identifier (user id, IP
/// address, API key).
///
/// Each allowed request re-stores the counter with the full window TTL, so
/// sustained traffic extends the window; counting is best-effort under
/// concurrent calls for the same identifier.
#[derive(Debug)]
pub struct RateLimiter {
    /// identifier -> request count within the current window
    cache: TtlCache<String, u32>,
    /// Maximum requests allowed per window
    max_requests: u32,
    /// Window duration, applied as the counter entry's TTL
    window: Duration,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            cache: TtlCache::new(window),
            max_requests,
            window,
        }
    }

    /// Creates a limiter from engine configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rate_limit_max_requests, config.rate_limit_window())
    }

    /// Returns the configured per-window request limit.
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    // == Is Allowed ==
    /// Checks whether a request from `identifier` is allowed, counting it
    /// if so.
    ///
    /// The first request in a window stores count 1 with the window TTL;
    /// later requests increment the stored count until the limit is hit.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        let key = Self::cache_key(identifier);

        let count = match self.cache.get(&key) {
            // First request in this window
            None => 1,
            Some(count) if count >= self.max_requests => {
                warn!(identifier, count, max = self.max_requests, "rate limit exceeded");
                return false;
            }
            Some(count) => count + 1,
        };

        self.cache.insert_with_ttl(key, count, self.window);
        debug!(identifier, count, max = self.max_requests, "rate limit count");
        true
    }

    // == Remaining Requests ==
    /// Returns how many requests `identifier` may still make in the current
    /// window.
    pub fn remaining_requests(&self, identifier: &str) -> u32 {
        self.max_requests.saturating_sub(self.current_count(identifier))
    }

    // == Current Count ==
    /// Returns the request count recorded for `identifier` in the current
    /// window, or 0 outside any window.
    pub fn current_count(&self, identifier: &str) -> u32 {
        self.cache.get(&Self::cache_key(identifier)).unwrap_or(0)
    }

    // == Reset ==
    /// Clears the window for `identifier` (admin operation).
    pub fn reset(&self, identifier: &str) {
        self.cache.remove(&Self::cache_key(identifier));
        info!(identifier, "rate limit reset");
    }

    fn cache_key(identifier: &str) -> String {
        format!("{KEY_PREFIX}{identifier}")
    }
}
