//! Per-district congestion state.
//!
//! # Refresh model
//!
//! Each district carries a scalar congestion load in `[0, max_load]`.  Loads
//! are **piecewise constant in simulated time**: they change only when more
//! than `update_period` has elapsed since the previous refresh, at which
//! point every district is resampled from a triangular distribution skewed
//! toward light traffic (support 5–95 % of `max_load`, mode at 30 %).
//! Within a period, `refresh` is an idempotent no-op, so travel-time
//! estimates taken at the same simulated instant always see the same
//! snapshot.
//!
//! A fresh episode starts with every load at zero (free flow) until the
//! first period elapses.

use chrono::{Duration, NaiveDateTime};
use rand_distr::{Distribution, Triangular};
use rustc_hash::FxHashMap;

use ems_core::{DistrictCode, SimRng};

/// Speeds are clamped to this floor so a saturated district yields a very
/// large but finite travel time.
const MIN_SPEED_KMH: f64 = 0.5;

/// Triangular load distribution, as fractions of `max_load`.
const LOAD_SUPPORT_LOW: f64 = 0.05;
const LOAD_SUPPORT_HIGH: f64 = 0.95;
const LOAD_MODE: f64 = 0.30;

// ── TrafficParams ─────────────────────────────────────────────────────────────

/// Static traffic-model parameters.
#[derive(Copy, Clone, Debug)]
pub struct TrafficParams {
    /// Minimum simulated time between load resamples.
    pub update_period: Duration,
    /// Upper bound of the congestion-load scale.
    pub max_load: f64,
    /// Free-flow average speed in km/h (speed at zero load).
    pub max_avg_speed_kmh: f64,
}

impl Default for TrafficParams {
    /// Reference values: 2.5 h refresh, load scale 0–100, 60 km/h free flow.
    fn default() -> Self {
        Self {
            update_period: Duration::seconds(9_000),
            max_load: 100.0,
            max_avg_speed_kmh: 60.0,
        }
    }
}

// ── TrafficModel ──────────────────────────────────────────────────────────────

/// Dynamic per-district congestion, owned exclusively by this model.
pub struct TrafficModel {
    params: TrafficParams,
    /// District codes in ascending order — resampling iterates this list so
    /// the RNG draw order (and therefore the run) is deterministic.
    codes: Vec<DistrictCode>,
    loads: FxHashMap<DistrictCode, f64>,
    last_refresh: NaiveDateTime,
}

impl TrafficModel {
    /// Create a model covering `codes`, anchored at `start` with all loads
    /// at zero.
    pub fn new(
        params: TrafficParams,
        codes: impl IntoIterator<Item = DistrictCode>,
        start: NaiveDateTime,
    ) -> Self {
        let mut codes: Vec<DistrictCode> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        let loads = codes.iter().map(|&c| (c, 0.0)).collect();
        Self { params, codes, loads, last_refresh: start }
    }

    pub fn params(&self) -> &TrafficParams {
        &self.params
    }

    /// Re-anchor for a new episode: all loads back to zero, refresh timer
    /// restarted at `start`.
    pub fn anchor(&mut self, start: NaiveDateTime) {
        for load in self.loads.values_mut() {
            *load = 0.0;
        }
        self.last_refresh = start;
    }

    /// Resample every district's load if `update_period` has elapsed since
    /// the last refresh; otherwise do nothing.
    pub fn refresh(&mut self, now: NaiveDateTime, rng: &mut SimRng) {
        if now - self.last_refresh <= self.params.update_period {
            return;
        }
        let max = self.params.max_load;
        // max_load > 0 is validated at configuration time, so the support is
        // always well-formed.
        let Ok(dist) = Triangular::new(
            LOAD_SUPPORT_LOW * max,
            LOAD_SUPPORT_HIGH * max,
            LOAD_MODE * max,
        ) else {
            return;
        };

        for &code in &self.codes {
            self.loads.insert(code, dist.sample(rng.inner()));
        }
        self.last_refresh = now;
    }

    /// Current congestion load of a district (0 for codes the model does
    /// not track, which keeps unassigned geometry at free flow unless the
    /// caller substitutes a trip-specific load).
    #[inline]
    pub fn load(&self, code: DistrictCode) -> f64 {
        self.loads.get(&code).copied().unwrap_or(0.0)
    }

    /// Travel speed implied by a congestion load, in km/h.
    ///
    /// Linear in load: free flow at zero, approaching zero as the load
    /// saturates, clamped to a small positive floor.
    #[inline]
    pub fn speed_kmh(&self, load: f64) -> f64 {
        (self.params.max_avg_speed_kmh * (1.0 - load / self.params.max_load)).max(MIN_SPEED_KMH)
    }

    #[cfg(test)]
    pub(crate) fn set_load(&mut self, code: DistrictCode, load: f64) {
        self.loads.insert(code, load);
    }
}
