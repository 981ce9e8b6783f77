//! Upstream Module
//!
//! Fetches the full brewery list from the third-party brewery API.

mod client;
mod wire;

pub use client::{BreweryClient, OpenBreweryClient};
pub use wire::decode_breweries;
