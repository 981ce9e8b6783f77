//! Brewery API - A cached brewery directory service
//!
//! Serves Open Brewery DB data through a filterable, sortable, paginated
//! endpoint, backed by a TTL cache with single-flight refresh.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use cache::BreweryCache;
pub use config::Config;
pub use service::BreweryService;
pub use tasks::spawn_refresh_task;
pub use upstream::{BreweryClient, OpenBreweryClient};
