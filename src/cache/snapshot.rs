//! Dataset Snapshot Module
//!
//! One fetched dataset plus its absolute expiration.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::models::BreweryEntity;

// == Dataset Snapshot ==
/// The cached brewery list and when it goes stale.
///
/// Cloning is cheap: the list itself is shared.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Breweries from the last successful fetch
    pub breweries: Arc<Vec<BreweryEntity>>,
    /// Wall-clock time of the fetch
    pub refreshed_at: DateTime<Utc>,
    /// Monotonic expiration instant
    pub expires_at: Instant,
}

impl DatasetSnapshot {
    // == Constructor ==
    /// Wraps a freshly fetched list, expiring `ttl` from now.
    pub fn new(breweries: Vec<BreweryEntity>, ttl: Duration) -> Self {
        Self {
            breweries: Arc::new(breweries),
            refreshed_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Expired once the current time reaches the expiration instant.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Time left before expiry, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Number of breweries in the snapshot.
    pub fn len(&self) -> usize {
        self.breweries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breweries.is_empty()
    }
}
