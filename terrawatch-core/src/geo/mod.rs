//! Geometry
//!
//! Planar containment and great-circle distance on WGS84 degrees.
//!
//! - **coordinate**: `Coordinate` (longitude, latitude) and `Polygon` (GeoJSON-style rings)
//! - **containment**: horizontal ray casting against a polygon's exterior ring
//! - **distance**: haversine distance in meters
//!
//! Containment treats longitude as x and latitude as y without reprojection.
//! That is fine for regional sales territories and wrong near the poles or
//! across the antimeridian.

mod containment;
mod coordinate;
mod distance;

pub use containment::{contains, ring_contains};
pub use coordinate::{Coordinate, Polygon};
pub use distance::distance_meters;
