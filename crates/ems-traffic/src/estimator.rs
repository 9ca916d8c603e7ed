//! District-aware travel-time estimation.
//!
//! Combines the route decomposition from `ems-districts` with the current
//! traffic snapshot: each district's share of the straight-line route is
//! driven at that district's congestion speed, and the per-district times
//! are summed.
//!
//! The **unassigned residual** is not driven at a global default speed: it
//! gets the mean load of the districts actually traversed on this trip,
//! recomputed per trip, so a route through congested districts does not get
//! a free-flow discount on its unattributed kilometres.

use chrono::NaiveDateTime;
use ems_core::{DistrictCode, Point, SimRng};
use ems_districts::{DistrictMap, RouteZone};

use crate::TrafficModel;

const HOUR_IN_SECS: f64 = 3_600.0;

/// Estimate the travel time in seconds from `origin` to `destination` at
/// simulated time `now`.
///
/// Refreshes the traffic model first (a no-op within the current refresh
/// period), so estimates taken at the same instant share one traffic
/// snapshot and the result is deterministic given that snapshot.  For a
/// fixed snapshot the estimate strictly increases with distance and with
/// any traversed district's load.
pub fn estimate_travel_secs(
    districts: &DistrictMap,
    traffic: &mut TrafficModel,
    rng: &mut SimRng,
    now: NaiveDateTime,
    (origin, origin_district): (Point, DistrictCode),
    (destination, destination_district): (Point, DistrictCode),
) -> f64 {
    traffic.refresh(now, rng);

    let lengths =
        districts.segment_lengths(origin_district, origin, destination_district, destination);

    // Trip-mean load of the traversed districts, for the residual bucket.
    // A trip touching no district at all (both endpoints unassigned) falls
    // back to free flow.
    let mut traversed_load_sum = 0.0;
    let mut traversed = 0usize;
    for zone in lengths.keys() {
        if let RouteZone::District(code) = zone {
            traversed_load_sum += traffic.load(*code);
            traversed += 1;
        }
    }
    let residual_load = if traversed > 0 {
        traversed_load_sum / traversed as f64
    } else {
        0.0
    };

    let hours: f64 = lengths
        .iter()
        .map(|(zone, km)| {
            let load = match zone {
                RouteZone::District(code) => traffic.load(*code),
                RouteZone::Unassigned => residual_load,
            };
            km / traffic.speed_kmh(load)
        })
        .sum();

    hours * HOUR_IN_SECS
}
