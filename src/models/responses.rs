//! Response DTOs for the brewery API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    /// Number of matches before pagination
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
    /// `ceil(total_count / page_size)`, zero when `page_size` is zero
    pub total_pages: usize,
}

impl<T> PagedResult<T> {
    /// Creates a PagedResult, deriving the page count
    pub fn new(items: Vec<T>, total_count: usize, page: u32, page_size: u32) -> Self {
        let total_pages = match page_size as usize {
            0 => 0,
            size => total_count.div_ceil(size),
        };
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages,
        }
    }
}

/// Uniform envelope returned by every service operation.
///
/// An unsuccessful envelope never carries data and always carries a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    /// Unsuccessful envelope with a user-facing message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    /// Unsuccessful envelope listing individual problems
    pub fn failure_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure(message)
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from a fresh dataset
    pub hits: u64,
    /// Reads that found the dataset empty or expired
    pub misses: u64,
    /// Completed upstream fetches
    pub refreshes: u64,
    /// Upstream fetches that failed
    pub failed_refreshes: u64,
    /// Breweries in the current dataset
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// When the dataset was last replaced
    pub last_refreshed_at: Option<DateTime<Utc>>,
    /// Seconds until the dataset goes stale
    pub expires_in_secs: Option<u64>,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            failed_refreshes: stats.failed_refreshes,
            total_entries: stats.total_entries,
            last_refreshed_at: stats.last_refreshed_at,
            expires_in_secs: stats.expires_in.map(|d| d.as_secs()),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_paged_result_total_pages() {
        let page: PagedResult<u8> = PagedResult::new(vec![], 41, 1, 20);
        assert_eq!(page.total_pages, 3);

        let exact: PagedResult<u8> = PagedResult::new(vec![], 40, 1, 20);
        assert_eq!(exact.total_pages, 2);

        let empty: PagedResult<u8> = PagedResult::new(vec![], 0, 1, 20);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_paged_result_zero_page_size() {
        let page: PagedResult<u8> = PagedResult::new(vec![], 7, 1, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_failure_envelope_invariant() {
        let resp: ApiResponse<Vec<String>> = ApiResponse::failure("Brewery not found");
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.message.as_deref(), Some("Brewery not found"));

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["data"].is_null());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_failure_with_errors_serialize() {
        let resp: ApiResponse<()> =
            ApiResponse::failure_with_errors("Invalid request", vec!["bad page".to_string()]);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("bad page"));
        assert!(json.contains("\"success\":false"));
    }

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            refreshes: 3,
            failed_refreshes: 1,
            total_entries: 200,
            last_refreshed_at: None,
            expires_in: Some(Duration::from_millis(59_900)),
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expires_in_secs, Some(59));
        assert_eq!(resp.total_entries, 200);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
