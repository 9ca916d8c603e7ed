//! `ems-traffic` — time-varying congestion and travel-time estimation for
//! the `ems_dt` simulator.
//!
//! Two pieces:
//!
//! - [`TrafficModel`]: per-district congestion loads, resampled from a
//!   low-skewed triangular distribution once per refresh period, and the
//!   linear load→speed curve.
//! - [`estimate_travel_secs`]: the travel-time estimator combining the
//!   route decomposition from `ems-districts` with the current snapshot.
//!
//! The model owns all mutable traffic state; the engine only ever talks to
//! it through `refresh`/`load`/`speed_kmh` and the estimator.

mod estimator;
mod model;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use estimator::estimate_travel_secs;
pub use model::{TrafficModel, TrafficParams};
