//! Background Tasks Module
//!
//! Contains optional background tasks an embedding application can run
//! alongside the caches.
//!
//! # Tasks
//! - TTL Cleanup: sweeps expired TTL cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
