//! Configuration Module
//!
//! Handles loading and managing engine configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries for the bounded (LRU/LFU) caches
    pub max_entries: usize,
    /// Default TTL in seconds for TTL cache entries without an explicit TTL
    pub default_ttl_secs: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval_secs: u64,
    /// Maximum requests per rate-limit window
    pub rate_limit_max_requests: u32,
    /// Rate-limit window duration in seconds
    pub rate_limit_window_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Bounded-cache capacity (default: 100)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 600)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests allowed per window (default: 10)
    /// - `RATE_LIMIT_WINDOW` - Window duration in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            default_ttl_secs: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            cleanup_interval_secs: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Returns the default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Returns the rate-limit window as a `Duration`.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            default_ttl_secs: 600,
            cleanup_interval_secs: 60,
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
        }
    }
}
