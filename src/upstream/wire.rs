//! Upstream payload decoding
//!
//! Keys are matched after lowercasing and stripping underscores, so
//! `postal_code`, `postalCode` and `PostalCode` all land in the same field.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::UpstreamError;
use crate::models::BreweryEntity;

/// Brewery record as sent by upstream, keyed by normalized field names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireBrewery {
    id: Option<String>,
    name: Option<String>,
    brewerytype: Option<String>,
    address1: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postalcode: Option<String>,
    country: Option<String>,
    phone: Option<String>,
    websiteurl: Option<String>,
    latitude: Option<Value>,
    longitude: Option<Value>,
}

impl From<WireBrewery> for BreweryEntity {
    fn from(wire: WireBrewery) -> Self {
        Self {
            id: wire.id.unwrap_or_default(),
            name: wire.name.unwrap_or_default(),
            brewery_type: wire.brewerytype.unwrap_or_default(),
            address_1: wire.address1.unwrap_or_default(),
            city: wire.city.unwrap_or_default(),
            state: wire.state.unwrap_or_default(),
            postal_code: wire.postalcode.unwrap_or_default(),
            country: wire.country.unwrap_or_default(),
            phone: wire.phone.unwrap_or_default(),
            website_url: wire.websiteurl.unwrap_or_default(),
            latitude: wire.latitude.as_ref().and_then(coordinate),
            longitude: wire.longitude.as_ref().and_then(coordinate),
        }
    }
}

/// Decodes an upstream JSON body into brewery entities.
///
/// The body must be a JSON array of objects. A `null` body decodes to an
/// empty list.
pub fn decode_breweries(body: &[u8]) -> Result<Vec<BreweryEntity>, UpstreamError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    let records = match value {
        Value::Array(records) => records,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(UpstreamError::Decode(format!(
                "expected a JSON array, got {}",
                kind_of(&other)
            )))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let wire: WireBrewery = serde_json::from_value(normalize_keys(record))
                .map_err(|e| UpstreamError::Decode(format!("record {index}: {e}")))?;
            Ok(wire.into())
        })
        .collect()
}

fn normalize_keys(record: Value) -> Value {
    match record {
        Value::Object(fields) => {
            let normalized: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (normalize_key(&key), value))
                .collect();
            Value::Object(normalized)
        }
        other => other,
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// Upstream sends coordinates as strings; accept numbers too.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
