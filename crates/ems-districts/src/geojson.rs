//! GeoJSON district-boundary loader.
//!
//! # Expected input
//!
//! A `FeatureCollection` with one `Polygon` feature per district.  The
//! district code is read from the `district_code` property, falling back to
//! `district_c` (the truncated column name that ESRI-derived exports carry).
//! Only the exterior ring is used; interior rings (holes) are not part of
//! the city model and are ignored.
//!
//! Coordinates are expected in the simulator's planar km frame (exports are
//! re-based on the city-centre origin offline, as part of the dataset
//! preparation pipeline).
//!
//! All failures here are fatal configuration errors: the engine must not
//! start with a partial district set.

use std::io::Read;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson, Value};

use ems_core::DistrictCode;

use crate::{DistrictError, DistrictResult};

/// An exterior boundary ring loaded from GeoJSON, keyed by district code.
pub type DistrictRing = (DistrictCode, Vec<(f64, f64)>);

/// Load district boundary rings from a GeoJSON file.
///
/// Returns rings in feature order (the order that decides first-match
/// containment once they become a [`DistrictMap`][crate::DistrictMap]).
pub fn load_district_rings(path: &Path) -> DistrictResult<Vec<DistrictRing>> {
    let file = std::fs::File::open(path)?;
    load_district_rings_reader(file)
}

/// Like [`load_district_rings`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded fixtures.
pub fn load_district_rings_reader<R: Read>(mut reader: R) -> DistrictResult<Vec<DistrictRing>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let geojson: GeoJson = contents
        .parse()
        .map_err(|e: geojson::Error| DistrictError::GeoJson(e.to_string()))?;
    let collection = FeatureCollection::try_from(geojson)
        .map_err(|e| DistrictError::GeoJson(e.to_string()))?;

    let mut rings = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let code = feature
            .property("district_code")
            .or_else(|| feature.property("district_c"))
            .and_then(|v| v.as_u64())
            .ok_or_else(|| {
                DistrictError::GeoJson(format!(
                    "feature {i}: missing numeric district_code/district_c property"
                ))
            })?;
        let code = u16::try_from(code)
            .map(DistrictCode)
            .map_err(|_| DistrictError::GeoJson(format!("feature {i}: district code {code} out of range")))?;

        let geometry = feature
            .geometry
            .ok_or_else(|| DistrictError::GeoJson(format!("feature {i}: no geometry")))?;
        let polygon = match geometry.value {
            Value::Polygon(rings) => rings,
            other => {
                return Err(DistrictError::GeoJson(format!(
                    "feature {i}: expected Polygon, got {}",
                    other.type_name()
                )))
            }
        };
        let exterior = polygon
            .first()
            .ok_or_else(|| DistrictError::GeoJson(format!("feature {i}: polygon has no rings")))?;

        let ring: Vec<(f64, f64)> = exterior
            .iter()
            .map(|position| match position.as_slice() {
                [x, y, ..] => Ok((*x, *y)),
                _ => Err(DistrictError::GeoJson(format!(
                    "feature {i}: position with fewer than 2 coordinates"
                ))),
            })
            .collect::<DistrictResult<_>>()?;

        rings.push((code, ring));
    }

    Ok(rings)
}
