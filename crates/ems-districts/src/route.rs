//! Straight-line route decomposition across district boundaries.
//!
//! # Contract
//!
//! A route is the straight segment origin→destination.  Intersecting it with
//! a district's exterior ring yields **0, 1, or N** crossing points: none if
//! the district is not touched, one if the route starts or ends inside it,
//! two for a clean transit, more if the route clips the district repeatedly.
//! Crossings are reported in encounter order from the origin.
//!
//! [`DistrictMap::segment_lengths`] turns crossings into per-district
//! distances by splicing the endpoints into their districts' lists and
//! summing **disjoint consecutive pairs** (`[p0,p1], [p2,p3], …` — each pair
//! is an entry/exit of the district; an odd leftover point is a tangential
//! touch and contributes nothing).  Whatever distance the pairs fail to
//! account for lands in the [`RouteZone::Unassigned`] residual, which callers
//! must carry forward rather than drop.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line};
use rustc_hash::FxHashMap;

use ems_core::{DistrictCode, Point};

use crate::DistrictMap;

/// Two crossing points closer than this along the route (in km) are the same
/// geometric hit seen from two adjacent ring edges (vertex pass-through).
const DUPLICATE_HIT_EPS_KM: f64 = 1e-9;

// ── RouteZone ─────────────────────────────────────────────────────────────────

/// Key of the per-trip distance decomposition: a concrete district, or the
/// residual distance that intersection arithmetic could not attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RouteZone {
    District(DistrictCode),
    Unassigned,
}

impl std::fmt::Display for RouteZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteZone::District(code) => write!(f, "{code}"),
            RouteZone::Unassigned => write!(f, "unassigned"),
        }
    }
}

// ── Route queries ─────────────────────────────────────────────────────────────

impl DistrictMap {
    /// Intersect the straight segment `origin→destination` with every
    /// district boundary ring.
    ///
    /// Returns, per crossed district, the crossing points sorted in
    /// encounter order from `origin`.  Districts without crossings are
    /// absent.  Both endpoints lying in one district legitimately produces
    /// an empty map.
    pub fn route_crossings(
        &self,
        origin: Point,
        destination: Point,
    ) -> FxHashMap<DistrictCode, Vec<Point>> {
        let mut crossings: FxHashMap<DistrictCode, Vec<Point>> = FxHashMap::default();
        let route = Line::new(
            Coord { x: origin.x, y: origin.y },
            Coord { x: destination.x, y: destination.y },
        );
        let route_len = origin.distance_km(destination);
        if route_len == 0.0 {
            return crossings;
        }

        for district in self.iter() {
            // Hits as (distance along route, point), before dedup.
            let mut hits: Vec<(f64, Point)> = Vec::new();
            for edge in district.polygon().exterior().lines() {
                match line_intersection(route, edge) {
                    Some(LineIntersection::SinglePoint { intersection, .. }) => {
                        hits.push((param_along(origin, destination, intersection), point(intersection)));
                    }
                    // Route runs along the ring edge: entry and exit of the
                    // shared stretch both count as crossings.
                    Some(LineIntersection::Collinear { intersection }) => {
                        hits.push((param_along(origin, destination, intersection.start),
                                   point(intersection.start)));
                        hits.push((param_along(origin, destination, intersection.end),
                                   point(intersection.end)));
                    }
                    None => {}
                }
            }
            if hits.is_empty() {
                continue;
            }

            hits.sort_by(|a, b| a.0.total_cmp(&b.0));
            // A route through a ring vertex hits both adjacent edges at the
            // same point; keep one.
            hits.dedup_by(|b, a| (b.0 - a.0).abs() * route_len < DUPLICATE_HIT_EPS_KM);

            crossings.insert(district.code, hits.into_iter().map(|(_, p)| p).collect());
        }

        crossings
    }

    /// Decompose a route into per-district distances plus the unassigned
    /// residual.
    ///
    /// `origin_district`/`destination_district` are where the endpoints were
    /// geocoded; [`DistrictCode::UNASSIGNED`] is accepted (distance walked
    /// outside every district simply stays in the residual).  The values sum
    /// to the straight-line distance within float tolerance; where district
    /// polygons overlap, the doubly attributed stretch makes the residual
    /// negative so the sum still holds.
    pub fn segment_lengths(
        &self,
        origin_district: DistrictCode,
        origin: Point,
        destination_district: DistrictCode,
        destination: Point,
    ) -> FxHashMap<RouteZone, f64> {
        let mut cuts = self.route_crossings(origin, destination);
        // Same-district routes have no crossings at all; seed the endpoint
        // districts so the splice below always has a list to extend.
        cuts.entry(origin_district).or_default().insert(0, origin);
        cuts.entry(destination_district).or_default().push(destination);

        let total = origin.distance_km(destination);
        let mut lengths: FxHashMap<RouteZone, f64> = FxHashMap::default();
        let mut attributed = 0.0;

        for (code, points) in &cuts {
            let distance = pair_sum_km(points);
            if code.is_sentinel() {
                // Endpoint outside every district: its stretch belongs to
                // the residual, merged below.
                continue;
            }
            attributed += distance;
            lengths.insert(RouteZone::District(*code), distance);
        }

        lengths.insert(RouteZone::Unassigned, total - attributed);
        lengths
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Sum of distances over disjoint consecutive pairs; odd leftover ignored.
fn pair_sum_km(points: &[Point]) -> f64 {
    points
        .chunks_exact(2)
        .map(|pair| pair[0].distance_km(pair[1]))
        .sum()
}

/// Scalar position of `c` along `a→b` (0 at `a`, 1 at `b`).
fn param_along(a: Point, b: Point, c: Coord<f64>) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    ((c.x - a.x) * dx + (c.y - a.y) * dy) / len2
}

#[inline]
fn point(c: Coord<f64>) -> Point {
    Point::new(c.x, c.y)
}
