//! Domain records and DTOs for the brewery service
//!
//! This module defines the canonical brewery record plus the
//! request/response shapes exchanged with the HTTP layer.

pub mod brewery;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use brewery::{BreweryEntity, BreweryOutput};
pub use requests::{AutocompleteQuery, SearchRequest, SortBy, SortOrder};
pub use responses::{ApiResponse, HealthResponse, PagedResult, StatsResponse};
