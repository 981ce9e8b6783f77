//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Pre-warm: Re-fetches the brewery dataset before readers hit a stale cache

mod refresh;

pub use refresh::spawn_refresh_task;
