//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.
//!
//! Absence is never an error in this crate: `get` and `contains_key` report
//! missing or expired keys through `Option`/`bool`, and `insert`, `remove`
//! and `clear` are total. The only failure category is misconfiguration,
//! caught at construction time.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Bounded cache constructed with a capacity that cannot hold any entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
