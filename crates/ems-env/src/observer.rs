//! Episode instrumentation.
//!
//! The engine itself never does I/O; anything that wants to watch an
//! episode (CSV logging, progress reporting) implements [`EnvObserver`]
//! and is driven by the runner.

use chrono::NaiveDateTime;

use crate::engine::StepInfo;
use crate::observation::Observation;

pub trait EnvObserver {
    /// Called once after `reset`, before the first step.
    fn on_reset(&mut self, _obs: &Observation) {}

    /// Called after every completed step.
    fn on_step_end(&mut self, _step: u64, _now: NaiveDateTime, _reward: f64, _info: &StepInfo) {}

    /// Called once when the episode terminates.
    fn on_episode_end(&mut self, _total_reward: f64) {}
}

/// Observer that records nothing.
#[derive(Default)]
pub struct NoopObserver;

impl EnvObserver for NoopObserver {}
