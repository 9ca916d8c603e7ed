//! `ems-districts` — district geometry for the `ems_dt` simulator.
//!
//! Owns the city's district polygons and answers the three geometric
//! questions the rest of the simulator asks:
//!
//! 1. **Which district contains point P?** — [`DistrictMap::district_containing`]
//! 2. **Where does a straight route cross district boundaries, and how much
//!    of it lies in each district?** — [`DistrictMap::route_crossings`] /
//!    [`DistrictMap::segment_lengths`]
//! 3. **Give me a uniform random point inside district D** —
//!    [`DistrictMap::random_point_in`]
//!
//! Polygon/point/line primitives come from the `geo` crate; boundary data
//! arrives either as plain `(x, y)` rings (tests, synthetic demos) or from a
//! GeoJSON export ([`load_district_rings`]).

mod district;
mod error;
mod geojson;
mod route;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use district::{District, DistrictMap};
pub use error::{DistrictError, DistrictResult};
pub use geojson::{load_district_rings, load_district_rings_reader, DistrictRing};
pub use route::RouteZone;
