//! API Module
//!
//! HTTP handlers and routing for the brewery REST API.
//!
//! # Endpoints
//! - `GET /api/v1/breweries` - Filtered, sorted, paginated listing
//! - `GET /api/v1/breweries/autocomplete` - Brewery name suggestions
//! - `GET /api/v1/breweries/:id` - Single brewery
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
