//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECS;

/// Default base URL of the Open Brewery DB API
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openbrewerydb.org/v1";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream brewery API
    pub upstream_base_url: String,
    /// Number of breweries requested per upstream fetch
    pub upstream_page_size: u32,
    /// Upstream HTTP request timeout in seconds
    pub upstream_timeout: u64,
    /// Lifetime of the cached dataset in seconds
    pub cache_ttl: u64,
    /// Serve the previous dataset when a refresh fails
    pub serve_stale_on_error: bool,
    /// Background pre-warm interval in seconds (0 disables the task)
    pub warm_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - Upstream API base URL (default: Open Brewery DB v1)
    /// - `UPSTREAM_PAGE_SIZE` - Breweries per fetch (default: 200)
    /// - `UPSTREAM_TIMEOUT` - Request timeout in seconds (default: 10)
    /// - `CACHE_TTL` - Dataset lifetime in seconds (default: 600)
    /// - `CACHE_SERVE_STALE_ON_ERROR` - Fall back to stale data (default: false)
    /// - `WARM_INTERVAL` - Pre-warm frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_page_size: parse_var("UPSTREAM_PAGE_SIZE")
                .unwrap_or(defaults.upstream_page_size),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            serve_stale_on_error: parse_var("CACHE_SERVE_STALE_ON_ERROR")
                .unwrap_or(defaults.serve_stale_on_error),
            warm_interval: parse_var("WARM_INTERVAL").unwrap_or(defaults.warm_interval),
        }
    }

    /// Cache TTL as a Duration
    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream timeout as a Duration
    pub fn upstream_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_page_size: 200,
            upstream_timeout: 10,
            cache_ttl: DEFAULT_TTL_SECS,
            serve_stale_on_error: false,
            warm_interval: 0,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream_page_size, 200);
        assert_eq!(config.cache_ttl, DEFAULT_TTL_SECS);
        assert_eq!(config.cache_ttl, 600);
        assert!(!config.serve_stale_on_error);
        assert_eq!(config.warm_interval, 0);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_duration(), Duration::from_secs(600));
        assert_eq!(config.upstream_timeout_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("BREWERY_TEST_PARSE_VAR", "not-a-number");
        assert_eq!(parse_var::<u64>("BREWERY_TEST_PARSE_VAR"), None);

        env::set_var("BREWERY_TEST_PARSE_VAR", " 42 ");
        assert_eq!(parse_var::<u64>("BREWERY_TEST_PARSE_VAR"), Some(42));
        env::remove_var("BREWERY_TEST_PARSE_VAR");
    }
}
