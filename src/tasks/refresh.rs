//! Cache Pre-warm Task
//!
//! Background task that periodically force-refreshes the brewery dataset.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::BreweryCache;

/// Spawns a background task that re-fetches the dataset every `interval`.
///
/// A failed refresh is logged and the loop carries on; the previous dataset
/// stays in place.
///
/// # Arguments
/// * `cache` - Shared brewery cache
/// * `interval` - Time between refreshes
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let refresh_handle = spawn_refresh_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// refresh_handle.abort();
/// ```
pub fn spawn_refresh_task(cache: Arc<BreweryCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting brewery pre-warm task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.force_refresh().await {
                Ok(count) => info!("Pre-warm: cached {} breweries", count),
                Err(e) => warn!(error = %e, "Pre-warm: refresh failed"),
            }
        }
    })
}
