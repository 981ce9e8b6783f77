//! API Handlers
//!
//! HTTP request handlers for each brewery endpoint. Handlers only pick an
//! HTTP status for the envelope the service returns.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cache::BreweryCache;
use crate::config::Config;
use crate::models::{
    ApiResponse, AutocompleteQuery, BreweryOutput, HealthResponse, PagedResult, SearchRequest,
    StatsResponse,
};
use crate::service::BreweryService;
use crate::upstream::BreweryClient;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: BreweryService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: BreweryService) -> Self {
        Self { service }
    }

    /// Builds the cache and service for `client` from configuration.
    pub fn from_config(client: Arc<dyn BreweryClient>, config: &Config) -> Self {
        let cache = BreweryCache::from_config(client, config);
        Self::new(BreweryService::new(Arc::new(cache)))
    }

    /// The cache backing the service.
    pub fn cache(&self) -> Arc<BreweryCache> {
        Arc::clone(self.service.cache())
    }
}

fn respond<T: Serialize>(envelope: ApiResponse<T>, failure: StatusCode) -> Response {
    let status = if envelope.success {
        StatusCode::OK
    } else {
        failure
    };
    (status, Json(envelope)).into_response()
}

/// Handler for GET /api/v1/breweries
///
/// Unsuccessful envelopes are returned with 400.
pub async fn list_breweries_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Response {
    let request = match query {
        Ok(Query(request)) => request,
        Err(rejection) => {
            let envelope: ApiResponse<PagedResult<BreweryOutput>> = ApiResponse::failure_with_errors(
                "Invalid search request",
                vec![rejection.body_text()],
            );
            return respond(envelope, StatusCode::BAD_REQUEST);
        }
    };

    let envelope = state.service.list_breweries(&request).await;
    respond(envelope, StatusCode::BAD_REQUEST)
}

/// Handler for GET /api/v1/breweries/:id
///
/// Unsuccessful envelopes are returned with 404.
pub async fn get_brewery_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let envelope = state.service.get_brewery(&id).await;
    respond(envelope, StatusCode::NOT_FOUND)
}

/// Handler for GET /api/v1/breweries/autocomplete
///
/// Always 200; failure is signalled only by the envelope.
pub async fn autocomplete_handler(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(state.service.autocomplete(query.search_term.as_deref()).await)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache().stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
