//! Query Module
//!
//! Filter, sort, paginate and project a brewery dataset.
//! Every stage is a pure function over a borrowed snapshot.

mod engine;
mod geo;


pub use engine::{execute, filter, paginate, project, sort, suggest_names, MAX_SUGGESTIONS};
pub use geo::{haversine_km, EARTH_RADIUS_KM};
