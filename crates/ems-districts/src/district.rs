//! District records and the code-keyed district map.
//!
//! # Containment semantics
//!
//! `district_containing` walks districts in configured order and returns the
//! **first** polygon that contains the point.  Real district datasets share
//! boundary segments; a point exactly on a shared edge is inside neither
//! polygon under `geo`'s strict containment, and the caller must handle the
//! `None` (hospital geocoding falls back to [`DistrictCode::UNASSIGNED`]).
//!
//! The `geo` crate supplies the polygon/point primitives; it stays a private
//! implementation detail of this crate, so callers hand over plain `(x, y)`
//! boundary rings.

use geo::{BoundingRect, Centroid, Contains, LineString, Polygon, Rect};
use rustc_hash::FxHashMap;

use ems_core::{DistrictCode, Point, SimRng};

use crate::{DistrictError, DistrictResult};

/// Rejection-sampling attempts before giving up and returning the centroid.
/// City districts are convex-ish; in practice a handful of draws suffice.
const MAX_REJECTION_DRAWS: usize = 1_024;

// ── District ──────────────────────────────────────────────────────────────────

/// One geographic district: immutable identity, stats, and boundary polygon.
///
/// The dynamic traffic load of a district is owned by `ems-traffic`, not
/// stored here.
pub struct District {
    pub code: DistrictCode,
    pub name: String,
    /// Surface area in km².
    pub surface_km2: f64,
    /// Population density in inhabitants/km².
    pub density: f64,
    polygon: Polygon<f64>,
    bbox: Rect<f64>,
}

impl District {
    /// Build a district from a closed boundary ring of `(x, y)` km points.
    ///
    /// The ring may be given open (first point not repeated at the end);
    /// `geo` closes it.  Rings with fewer than 3 distinct points are
    /// rejected, as is the reserved code 0.
    pub fn new(
        code: DistrictCode,
        name: impl Into<String>,
        surface_km2: f64,
        density: f64,
        ring: &[(f64, f64)],
    ) -> DistrictResult<Self> {
        if code.is_sentinel() {
            return Err(DistrictError::ReservedCode);
        }
        if ring.len() < 3 {
            return Err(DistrictError::DegenerateRing(code, ring.len()));
        }
        let polygon = Polygon::new(LineString::from(ring.to_vec()), vec![]);
        let bbox = polygon
            .bounding_rect()
            .ok_or(DistrictError::DegenerateRing(code, ring.len()))?;
        Ok(Self {
            code,
            name: name.into(),
            surface_km2,
            density,
            polygon,
            bbox,
        })
    }

    /// Strict point-in-polygon test (boundary points are outside).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.polygon.contains(&geo::Point::new(p.x, p.y))
    }

    pub(crate) fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }
}

// ── DistrictMap ───────────────────────────────────────────────────────────────

/// All configured districts, queryable by code and by containment.
pub struct DistrictMap {
    /// Districts in configured order — the order that decides first-match
    /// containment ties.
    districts: Vec<District>,
    by_code: FxHashMap<DistrictCode, usize>,
}

impl DistrictMap {
    /// Validate and index a set of districts.  Duplicate codes are fatal.
    pub fn new(districts: Vec<District>) -> DistrictResult<Self> {
        let mut by_code = FxHashMap::default();
        for (i, d) in districts.iter().enumerate() {
            if by_code.insert(d.code, i).is_some() {
                return Err(DistrictError::DuplicateCode(d.code));
            }
        }
        Ok(Self { districts, by_code })
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &District> {
        self.districts.iter()
    }

    /// All district codes in configured order.
    pub fn codes(&self) -> impl Iterator<Item = DistrictCode> + '_ {
        self.districts.iter().map(|d| d.code)
    }

    pub fn get(&self, code: DistrictCode) -> Option<&District> {
        self.by_code.get(&code).map(|&i| &self.districts[i])
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The code of the first district whose polygon contains `p`, if any.
    pub fn district_containing(&self, p: Point) -> Option<DistrictCode> {
        self.districts.iter().find(|d| d.contains(p)).map(|d| d.code)
    }

    /// Uniformly sample a point inside the district's polygon.
    ///
    /// Rejection-samples the bounding box; bounded at
    /// [`MAX_REJECTION_DRAWS`] attempts so pathological shapes cannot loop
    /// forever, falling back to the polygon centroid.
    pub fn random_point_in(
        &self,
        code: DistrictCode,
        rng: &mut SimRng,
    ) -> DistrictResult<Point> {
        let district = self
            .get(code)
            .ok_or(DistrictError::UnknownDistrict(code))?;
        let (min, max) = (district.bbox.min(), district.bbox.max());

        for _ in 0..MAX_REJECTION_DRAWS {
            let p = Point::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
            if district.contains(p) {
                return Ok(p);
            }
        }

        // Sliver polygon or numerically hostile ring: settle for the centroid.
        let c = district
            .polygon
            .centroid()
            .ok_or(DistrictError::DegenerateRing(code, 0))?;
        Ok(Point::new(c.x(), c.y()))
    }
}
