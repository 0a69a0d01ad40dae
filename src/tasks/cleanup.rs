//! Expiry Sweep Task
//!
//! Background task that periodically purges expired entries from a response cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically removes expired cache entries.
///
/// Lookups already ignore expired entries; the sweep only releases their memory
/// earlier than the next insert into a full pool would.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// when the owning client is dropped.
///
/// # Example
/// ```ignore
/// let client = NominatimClient::new(config)?;
/// let sweep = spawn_cleanup_task(client.cache().clone(), Duration::from_secs(60));
/// // Later:
/// sweep.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: Arc<ResponseCache<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting cache expiry sweep");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
