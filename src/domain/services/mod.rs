//! Domain Services
//!
//! Pure functions over outlets. No I/O.

mod catalog;
mod geodistance;
mod proximity;

pub use catalog::{OutletCatalog, DEFAULT_SUGGESTION_LIMIT};
pub use geodistance::{distance_km, EARTH_RADIUS_KM};
pub use proximity::{around_point, nearby, nearby_with_distance, DEFAULT_RADIUS_KM};
