//! Cache Store Module
//!
//! Serves the full brewery dataset with at most one upstream fetch per
//! expiration window.
//!
//! Reads of a fresh dataset only take the snapshot read lock. On a miss,
//! callers queue on the flight mutex; the first one fetches, and every
//! caller that was waiting meanwhile takes that attempt's outcome instead
//! of fetching again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::cache::{CacheCounters, CacheStats, DatasetSnapshot};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::BreweryEntity;
use crate::upstream::BreweryClient;

/// Shared, immutable view of the cached dataset.
pub type Breweries = Arc<Vec<BreweryEntity>>;

/// Outcome of the most recent refresh attempt.
#[derive(Debug, Default)]
struct FlightState {
    last_error: Option<UpstreamError>,
}

// == Brewery Cache ==
/// Whole-dataset cache in front of a `BreweryClient`.
pub struct BreweryCache {
    /// Upstream data source
    client: Arc<dyn BreweryClient>,
    /// Lifetime of a fetched dataset
    ttl: Duration,
    /// Serve the previous dataset when a refresh fails
    serve_stale_on_error: bool,
    /// Current dataset, None until the first successful fetch
    snapshot: RwLock<Option<DatasetSnapshot>>,
    /// Held for the duration of a refresh
    flight: Mutex<FlightState>,
    /// Finished refresh attempts, bumped while `flight` is held
    attempts: AtomicU64,
    counters: CacheCounters,
}

impl BreweryCache {
    // == Constructor ==
    /// Creates an empty cache with the given TTL.
    ///
    /// # Arguments
    /// * `client` - Source used to (re)load the dataset
    /// * `ttl` - How long a fetched dataset stays fresh
    pub fn new(client: Arc<dyn BreweryClient>, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            serve_stale_on_error: false,
            snapshot: RwLock::new(None),
            flight: Mutex::new(FlightState::default()),
            attempts: AtomicU64::new(0),
            counters: CacheCounters::new(),
        }
    }

    /// Creates a cache from the TTL and fallback settings in `config`.
    pub fn from_config(client: Arc<dyn BreweryClient>, config: &Config) -> Self {
        Self::new(client, config.cache_ttl_duration())
            .with_stale_fallback(config.serve_stale_on_error)
    }

    /// When enabled, a failed refresh serves the previous dataset instead of
    /// failing the read.
    pub fn with_stale_fallback(mut self, enabled: bool) -> Self {
        self.serve_stale_on_error = enabled;
        self
    }

    // == Get All ==
    /// Returns the cached dataset, refreshing it first if empty or expired.
    ///
    /// Concurrent callers hitting an empty or stale cache share one upstream
    /// fetch.
    pub async fn get_all(&self) -> Result<Breweries, UpstreamError> {
        if let Some(breweries) = self.fresh().await {
            self.counters.record_hit();
            debug!(count = breweries.len(), "Served breweries from cache");
            return Ok(breweries);
        }
        self.counters.record_miss();

        let seen = self.attempts.load(Ordering::Acquire);
        let mut flight = self.flight.lock().await;

        if self.attempts.load(Ordering::Acquire) != seen {
            // A refresh finished while we queued. A later failed attempt
            // leaves an earlier fresh dataset in place, so check that first.
            if let Some(breweries) = self.fresh().await {
                return Ok(breweries);
            }
            return match flight.last_error.clone() {
                None => match self.current().await {
                    Some(snapshot) => Ok(snapshot.breweries),
                    None => self.refresh_locked(&mut flight).await,
                },
                Some(err) => self.stale_or(err).await,
            };
        }

        // A refresh may have finished between the fast path and `seen`.
        if let Some(breweries) = self.fresh().await {
            return Ok(breweries);
        }

        match self.refresh_locked(&mut flight).await {
            Ok(breweries) => Ok(breweries),
            Err(err) => self.stale_or(err).await,
        }
    }

    // == Get By Id ==
    /// Looks up one brewery by identifier, ignoring case.
    ///
    /// A miss is `Ok(None)`; only a failed refresh is an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<BreweryEntity>, UpstreamError> {
        let breweries = self.get_all().await?;
        Ok(breweries.iter().find(|b| b.has_id(id)).cloned())
    }

    // == Force Refresh ==
    /// Re-fetches and replaces the dataset regardless of expiration.
    ///
    /// Returns the number of breweries now cached. Never falls back to
    /// stale data.
    pub async fn force_refresh(&self) -> Result<usize, UpstreamError> {
        let mut flight = self.flight.lock().await;
        self.refresh_locked(&mut flight)
            .await
            .map(|breweries| breweries.len())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.counters.snapshot();
        if let Some(snapshot) = self.current().await {
            stats.total_entries = snapshot.len();
            stats.last_refreshed_at = Some(snapshot.refreshed_at);
            stats.expires_in = Some(snapshot.ttl_remaining());
        }
        stats
    }

    /// True once a dataset has been fetched, fresh or not.
    pub async fn is_populated(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    async fn current(&self) -> Option<DatasetSnapshot> {
        self.snapshot.read().await.clone()
    }

    async fn fresh(&self) -> Option<Breweries> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|snapshot| !snapshot.is_expired())
            .map(|snapshot| Arc::clone(&snapshot.breweries))
    }

    /// Fetches and swaps in a new dataset. Caller must hold `flight`.
    async fn refresh_locked(&self, flight: &mut FlightState) -> Result<Breweries, UpstreamError> {
        let outcome = match self.client.fetch_all().await {
            Ok(breweries) => {
                let snapshot = DatasetSnapshot::new(breweries, self.ttl);
                let shared = Arc::clone(&snapshot.breweries);
                *self.snapshot.write().await = Some(snapshot);

                flight.last_error = None;
                self.counters.record_refresh();
                info!(
                    count = shared.len(),
                    ttl_secs = self.ttl.as_secs(),
                    "Cached breweries"
                );
                Ok(shared)
            }
            Err(err) => {
                flight.last_error = Some(err.clone());
                self.counters.record_failed_refresh();
                error!(error = %err, "Error refreshing brewery cache");
                Err(err)
            }
        };

        self.attempts.fetch_add(1, Ordering::Release);
        outcome
    }

    async fn stale_or(&self, err: UpstreamError) -> Result<Breweries, UpstreamError> {
        if self.serve_stale_on_error {
            if let Some(snapshot) = self.current().await {
                warn!(
                    error = %err,
                    count = snapshot.len(),
                    "Refresh failed, serving stale breweries"
                );
                return Ok(snapshot.breweries);
            }
        }
        Err(err)
    }
}

impl std::fmt::Debug for BreweryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreweryCache")
            .field("ttl", &self.ttl)
            .field("serve_stale_on_error", &self.serve_stale_on_error)
            .field("attempts", &self.attempts.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
