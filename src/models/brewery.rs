//! Brewery records
//!
//! `BreweryEntity` is the canonical record held by the cache;
//! `BreweryOutput` is the projection returned to callers.

use serde::Serialize;

/// A brewery as fetched from the upstream source.
///
/// Never mutated after a fetch; a refresh replaces the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreweryEntity {
    /// Externally assigned identifier, compared case-insensitively
    pub id: String,
    pub name: String,
    pub brewery_type: String,
    pub address_1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub website_url: String,
    /// Absent when upstream has no geocoding for the brewery
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BreweryEntity {
    /// Case-insensitive identifier comparison.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.to_lowercase() == id.to_lowercase()
    }

    /// Returns `(latitude, longitude)` when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Brewery as returned by the query endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreweryOutput {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_url: String,
    /// Great-circle distance in kilometres from the caller's position
    pub distance: Option<f64>,
}

impl BreweryOutput {
    /// Projects an entity, attaching a precomputed distance if any.
    pub fn from_entity(entity: &BreweryEntity, distance: Option<f64>) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            city: entity.city.clone(),
            state: entity.state.clone(),
            phone: entity.phone.clone(),
            website_url: entity.website_url.clone(),
            distance,
        }
    }
}

impl From<&BreweryEntity> for BreweryOutput {
    fn from(entity: &BreweryEntity) -> Self {
        Self::from_entity(entity, None)
    }
}
