//! TTL Cleanup Task
//!
//! Background task that periodically removes expired TTL cache entries.
//!
//! The cache itself never spawns tasks; scheduling the active sweep is the
//! owner's decision, and this helper is one way to make it.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. The cache is internally concurrent, so the sweep runs
/// without blocking readers or writers.
///
/// # Arguments
/// * `cache` - Shared reference to the TTL cache to sweep
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(TtlCache::<String, String>::new(Duration::from_secs(300)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<K, V>(
    cache: Arc<TtlCache<K, V>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            interval_secs = cleanup_interval_secs,
            "starting ttl cleanup task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();

            if removed > 0 {
                info!(removed, "ttl cleanup: removed expired entries");
            } else {
                debug!("ttl cleanup: no expired entries found");
            }
        }
    })
}
