//! Fixed-shape observation handed to the agent after every step.
//!
//! Shapes depend only on configuration (hospital count, severity tiers,
//! `shown_emergencies`), never on queue contents, so the tensors an RL
//! framework builds from this stay constant across an episode.

use std::collections::{BTreeMap, VecDeque};

use ems_core::{HospitalId, SimClock};

use crate::state::{ActiveAmbulance, Emergency, Hospital};

/// Snapshot of the visible simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// One row per configured hospital, ordered by id:
    /// `[id, x, y, district, available, inbound]`.
    pub hospitals: Vec<[f64; 6]>,
    /// One table per severity tier (tier 1 first), each `shown` rows of
    /// `[severity, queue_pos, steps_active, x, y, district]`, zero-filled
    /// past the queue's end.
    pub emergencies: Vec<Vec<[f64; 6]>>,
    /// `[step_secs, month, day, weekday, hour, minute]`.
    pub time: [f64; 6],
}

impl Observation {
    pub(crate) fn build(
        hospitals: &BTreeMap<HospitalId, Hospital>,
        queues: &[VecDeque<Emergency>],
        active: &[ActiveAmbulance],
        shown: usize,
        clock: &SimClock,
    ) -> Self {
        let mut hospital_rows = Vec::with_capacity(hospitals.len());
        for (id, h) in hospitals {
            let inbound = active.iter().filter(|a| a.destination == *id).count();
            hospital_rows.push([
                f64::from(*id),
                h.location.x,
                h.location.y,
                f64::from(h.district),
                f64::from(h.available),
                inbound as f64,
            ]);
        }

        // queues[0] is the repositioning tier and never holds emergencies.
        let mut tables = Vec::with_capacity(queues.len().saturating_sub(1));
        for queue in queues.iter().skip(1) {
            let mut rows = vec![[0.0; 6]; shown];
            for (pos, e) in queue.iter().take(shown).enumerate() {
                rows[pos] = [
                    f64::from(e.severity),
                    pos as f64,
                    clock.steps_since(e.created_at) as f64,
                    e.location.x,
                    e.location.y,
                    f64::from(e.district),
                ];
            }
            tables.push(rows);
        }

        Self {
            hospitals: hospital_rows,
            emergencies: tables,
            time: clock.context_vector(),
        }
    }
}
