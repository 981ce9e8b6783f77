//! API Routes
//!
//! Configures the Axum router with all brewery endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    autocomplete_handler, get_brewery_handler, health_handler, list_breweries_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/breweries` - Filtered, sorted, paginated listing
/// - `GET /api/v1/breweries/autocomplete` - Brewery name suggestions
/// - `GET /api/v1/breweries/:id` - Single brewery
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, method and header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/breweries", get(list_breweries_handler))
        .route("/api/v1/breweries/autocomplete", get(autocomplete_handler))
        .route("/api/v1/breweries/:id", get(get_brewery_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
