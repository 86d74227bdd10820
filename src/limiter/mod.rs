//! Rate Limiter Module
//!
//! Fixed-window request limiting built on the TTL cache.

mod rate_limit;

pub use rate_limit::RateLimiter;
