//! Brewery Service
//!
//! Facade over the cache and query engine. Every operation returns an
//! `ApiResponse`; failures carry a generic message while the full error is
//! logged.

use std::sync::Arc;

use tracing::{debug, error};

use crate::cache::BreweryCache;
use crate::error::{Result, ServiceError};
use crate::models::{ApiResponse, BreweryOutput, PagedResult, SearchRequest};
use crate::query::{self, MAX_SUGGESTIONS};

/// Largest page size a caller may request
pub const MAX_PAGE_SIZE: u32 = 200;

/// Shortest autocomplete term that triggers a lookup
pub const MIN_AUTOCOMPLETE_LEN: usize = 2;

const LIST_FAILED: &str = "An error occurred while retrieving breweries";
const GET_FAILED: &str = "An error occurred while retrieving the brewery";
const AUTOCOMPLETE_FAILED: &str = "An error occurred while getting suggestions";
const NOT_FOUND: &str = "Brewery not found";
const INVALID_REQUEST: &str = "Invalid search request";

/// Entry point used by the HTTP layer.
#[derive(Debug, Clone)]
pub struct BreweryService {
    cache: Arc<BreweryCache>,
}

impl BreweryService {
    pub fn new(cache: Arc<BreweryCache>) -> Self {
        Self { cache }
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &Arc<BreweryCache> {
        &self.cache
    }

    // == List ==
    /// Filtered, sorted page of breweries.
    pub async fn list_breweries(
        &self,
        request: &SearchRequest,
    ) -> ApiResponse<PagedResult<BreweryOutput>> {
        match self.try_list(request).await {
            Ok(page) => ApiResponse::ok(page),
            Err(ServiceError::Validation(errors)) => {
                debug!(?errors, "Rejected brewery search request");
                ApiResponse::failure_with_errors(INVALID_REQUEST, errors)
            }
            Err(err) => {
                error!(error = %err, "Error retrieving breweries");
                ApiResponse::failure(LIST_FAILED)
            }
        }
    }

    async fn try_list(&self, request: &SearchRequest) -> Result<PagedResult<BreweryOutput>> {
        validate(request)?;
        let breweries = self.cache.get_all().await?;
        Ok(query::execute(&breweries, request))
    }

    // == Get ==
    /// Single brewery by identifier (case-insensitive).
    pub async fn get_brewery(&self, id: &str) -> ApiResponse<BreweryOutput> {
        match self.cache.get_by_id(id).await {
            Ok(Some(brewery)) => ApiResponse::ok(BreweryOutput::from(&brewery)),
            Ok(None) => {
                debug!(id, "Brewery not found");
                ApiResponse::failure(NOT_FOUND)
            }
            Err(err) => {
                error!(id, error = %err, "Error retrieving brewery");
                ApiResponse::failure(GET_FAILED)
            }
        }
    }

    // == Autocomplete ==
    /// Up to ten distinct brewery names containing `term`.
    ///
    /// Terms that are blank or shorter than two characters return an empty
    /// list without reading the cache.
    pub async fn autocomplete(&self, term: Option<&str>) -> ApiResponse<Vec<String>> {
        let term = match term {
            Some(t) if !t.trim().is_empty() && t.chars().count() >= MIN_AUTOCOMPLETE_LEN => t,
            _ => return ApiResponse::ok(Vec::new()),
        };

        match self.cache.get_all().await {
            Ok(breweries) => ApiResponse::ok(query::suggest_names(&breweries, term, MAX_SUGGESTIONS)),
            Err(err) => {
                error!(term, error = %err, "Error getting autocomplete suggestions");
                ApiResponse::failure(AUTOCOMPLETE_FAILED)
            }
        }
    }
}

/// Checks paging parameters, collecting every problem.
pub fn validate(request: &SearchRequest) -> Result<()> {
    let mut errors = Vec::new();

    if request.page < 1 {
        errors.push("page must be at least 1".to_string());
    }
    if request.page_size < 1 {
        errors.push("page_size must be at least 1".to_string());
    } else if request.page_size > MAX_PAGE_SIZE {
        errors.push(format!("page_size must be at most {MAX_PAGE_SIZE}"));
    }
    if let Some(lat) = request.user_latitude {
        if !(-90.0..=90.0).contains(&lat) {
            errors.push("user_latitude must be between -90 and 90".to_string());
        }
    }
    if let Some(lon) = request.user_longitude {
        if !(-180.0..=180.0).contains(&lon) {
            errors.push("user_longitude must be between -180 and 180".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}
