//! `ems-core` — foundational types for the `ems_dt` ambulance-dispatch
//! simulator.
//!
//! This crate is a dependency of every other `ems-*` crate.  It intentionally
//! has no `ems-*` dependencies and minimal external ones (only `rand`,
//! `chrono`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                   |
//! |-----------|--------------------------------------------|
//! | [`ids`]   | `HospitalId`, `DistrictCode`               |
//! | [`point`] | planar `Point`, Euclidean distance         |
//! | [`time`]  | `SimClock` (civil calendar, fixed step)    |
//! | [`rng`]   | `SimRng` (explicitly owned, seedable)      |
//! | [`error`] | `EmsError`, `EmsResult`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EmsError, EmsResult};
pub use ids::{DistrictCode, HospitalId};
pub use point::Point;
pub use rng::SimRng;
pub use time::SimClock;
