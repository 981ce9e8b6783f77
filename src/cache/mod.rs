//! Cache Module
//!
//! Holds the full brewery dataset with absolute TTL expiration and
//! single-flight refresh.

mod snapshot;
mod stats;
mod store;

// Re-export public types
pub use snapshot::DatasetSnapshot;
pub use stats::{CacheCounters, CacheStats};
pub use store::{Breweries, BreweryCache};

// == Public Constants ==
/// Default lifetime of a fetched dataset in seconds
pub const DEFAULT_TTL_SECS: u64 = 600;
