//! Gym-style ambulance-dispatch environment.
//!
//! Brings the city together: configuration, hospitals and fleets, Poisson
//! emergency generation, the traffic-aware travel-time estimator, and the
//! discrete-time `reset`/`step` engine an RL training loop drives.
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`config`]    | JSON city configuration and validation              |
//! | [`state`]     | Hospitals, emergencies, in-flight ambulances        |
//! | [`action`]    | Per-tier dispatch action                            |
//! | [`generator`] | Poisson emergency generation with stress scaling    |
//! | [`engine`]    | The `CityEnv` reset/step loop                       |
//! | [`observation`] | Fixed-shape agent observation                     |
//! | [`agent`]     | `Agent` trait and the random baseline               |
//! | [`runner`]    | Episode driver with observer hooks                  |
//! | [`observer`]  | `EnvObserver` instrumentation trait                 |

pub mod action;
pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod observation;
pub mod observer;
pub mod runner;
pub mod state;


pub use action::Action;
pub use agent::{Agent, RandomAgent};
pub use config::{
    CityConfig, DistrictConfig, HospitalConfig, SeverityConfig, TrafficConfig,
};
pub use engine::{CityEnv, StepInfo};
pub use ems_districts::{load_district_rings, DistrictRing};
pub use error::{EnvError, EnvResult};
pub use generator::EmergencyGenerator;
pub use observation::Observation;
pub use observer::{EnvObserver, NoopObserver};
pub use runner::run_episode;
pub use state::{ActiveAmbulance, Emergency, Hospital, Phase};
