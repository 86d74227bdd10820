//! kvcache - An in-memory cache engine
//!
//! Provides three interchangeable eviction policies (LRU, LFU, TTL) behind a
//! common [`Cache`](cache::Cache) capability trait, plus a fixed-window
//! [`RateLimiter`](limiter::RateLimiter) built on the TTL cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod tasks;

pub use cache::{Cache, LfuCache, LruCache, TtlCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use limiter::RateLimiter;
pub use tasks::spawn_cleanup_task;
