//! Request DTOs for the brewery API
//!
//! Defines the query parameters accepted by the listing and
//! autocomplete endpoints.

use serde::{Deserialize, Deserializer};

/// Default page size when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

// == Sort Key ==
/// Field the listing is ordered by.
///
/// Parsing is case-insensitive. Anything unrecognized becomes
/// `Unrecognized`, which sorts by name ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Name,
    City,
    Distance,
    Unrecognized,
}

impl SortBy {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "city" => Self::City,
            "distance" => Self::Distance,
            _ => Self::Unrecognized,
        }
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// == Sort Direction ==
/// Direction applied to the sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["asc", "desc", "ascending", "descending"],
            )),
        }
    }
}

/// Query parameters for GET /api/v1/breweries
///
/// Both snake_case and camelCase parameter names are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Substring matched against the brewery name
    #[serde(alias = "searchTerm")]
    pub search_term: Option<String>,
    /// Substring matched against the city
    pub city: Option<String>,
    /// Substring matched against the state
    pub state: Option<String>,
    #[serde(alias = "sortBy")]
    pub sort_by: SortBy,
    #[serde(alias = "sortOrder")]
    pub sort_order: SortOrder,
    #[serde(alias = "userLatitude")]
    pub user_latitude: Option<f64>,
    #[serde(alias = "userLongitude")]
    pub user_longitude: Option<f64>,
    /// 1-based page number
    pub page: u32,
    #[serde(alias = "pageSize")]
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            search_term: None,
            city: None,
            state: None,
            sort_by: SortBy::Name,
            sort_order: SortOrder::Asc,
            user_latitude: None,
            user_longitude: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    /// Caller position, present only when both coordinates were supplied.
    pub fn user_position(&self) -> Option<(f64, f64)> {
        match (self.user_latitude, self.user_longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Query parameters for GET /api/v1/breweries/autocomplete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default, alias = "searchTerm")]
    pub search_term: Option<String>,
}
