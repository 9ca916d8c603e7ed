//! Agent interface and a baseline random policy.
//!
//! Learning agents live outside this crate; [`RandomAgent`] exists to
//! exercise the environment end to end and as the floor any trained policy
//! must beat.

use ems_core::{HospitalId, SimRng};

use crate::action::Action;
use crate::observation::Observation;

pub trait Agent {
    fn act(&mut self, obs: &Observation) -> Action;
}

/// Picks a uniformly random hospital (or no-op) for every tier slot, with
/// its own RNG stream so agent draws never perturb the environment's.
pub struct RandomAgent {
    hospital_ids: Vec<HospitalId>,
    severity_levels: u8,
    rng: SimRng,
}

impl RandomAgent {
    pub fn new(hospital_ids: Vec<HospitalId>, severity_levels: u8, seed: u64) -> Self {
        Self { hospital_ids, severity_levels, rng: SimRng::new(seed) }
    }

    /// Null with index 0, otherwise one of the configured hospitals.
    fn draw(&mut self) -> HospitalId {
        let pick = self.rng.gen_range(0..=self.hospital_ids.len());
        if pick == 0 {
            HospitalId::NULL
        } else {
            self.hospital_ids[pick - 1]
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _obs: &Observation) -> Action {
        let slots = self.severity_levels as usize + 1;
        let start = (0..slots).map(|_| self.draw()).collect();
        let end = (0..slots).map(|_| self.draw()).collect();
        Action::new(start, end)
    }
}
