//! The dispatch environment: a gym-style `reset`/`step` loop over the city.
//!
//! # Step order
//!
//! Every step runs the same seven stages:
//!
//! 1. validate the whole action (no partial application on a bad action),
//! 2. advance the clock and refresh the traffic snapshot,
//! 3. generate this step's emergencies,
//! 4. flip outgoing ambulances that reached their objective (reward released),
//! 5. credit incoming ambulances that reached their hospital,
//! 6. apply the tier-0 repositioning slot,
//! 7. dispatch tiers 1..=severity_levels against their FIFO queues,
//!
//! then build the observation.  An ambulance whose whole trip fits in a
//! single step flips in stage 4 and is credited in stage 5 of the *same*
//! step.

use std::collections::{BTreeMap, VecDeque};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use ems_core::{DistrictCode, HospitalId, Point, SimClock, SimRng};
use ems_districts::{DistrictMap, DistrictRing};
use ems_traffic::{TrafficModel, estimate_travel_secs};

use crate::action::Action;
use crate::config::CityConfig;
use crate::error::{EnvError, EnvResult};
use crate::generator::EmergencyGenerator;
use crate::observation::Observation;
use crate::state::{ActiveAmbulance, Emergency, Hospital, Phase};

const DEFAULT_SEED: u64 = 0;

/// Per-step counters, returned alongside the reward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Emergencies generated this step (all tiers).
    pub generated: u32,
    /// Ambulances dispatched to emergencies this step.
    pub dispatched: u32,
    /// Repositioning moves started this step (0 or 1).
    pub repositioned: u32,
    /// Emergencies still waiting across all tiers after dispatch.
    pub queued: u32,
}

/// The city environment.
pub struct CityEnv {
    severity_levels: u8,
    shown: usize,
    step: Duration,
    districts: DistrictMap,
    hospitals: BTreeMap<HospitalId, Hospital>,
    total_fleet: u32,
    clock: SimClock,
    traffic: TrafficModel,
    generator: EmergencyGenerator,
    /// Index 0 is the repositioning tier and stays empty.
    queues: Vec<VecDeque<Emergency>>,
    active: Vec<ActiveAmbulance>,
    rng: SimRng,
}

impl CityEnv {
    /// Build an environment from a validated configuration and the district
    /// rings loaded from GeoJSON.  The clock starts on the default episode
    /// window; call [`reset`](Self::reset) to choose another.
    pub fn new(config: &CityConfig, rings: &[DistrictRing]) -> EnvResult<Self> {
        let districts = config.build_district_map(rings)?;

        let mut hospitals = BTreeMap::new();
        let mut total_fleet = 0u32;
        for (&raw_id, hc) in &config.hospitals {
            let id = HospitalId(raw_id);
            let location = Point::new(hc.x, hc.y);
            let district = districts
                .district_containing(location)
                .unwrap_or(DistrictCode::UNASSIGNED);
            total_fleet += hc.fleet_size;
            hospitals.insert(
                id,
                Hospital {
                    id,
                    name: hc.name.clone(),
                    location,
                    district,
                    fleet_size: hc.fleet_size,
                    available: hc.fleet_size,
                },
            );
        }

        let generator = EmergencyGenerator::new(&config.severities, &districts)?;
        let severity_levels = generator.severity_levels();

        let clock = SimClock::new(
            default_episode_start(),
            default_episode_end(),
            Duration::seconds(config.step_secs),
        );
        let traffic = TrafficModel::new(config.traffic_params(), districts.codes(), clock.start);

        Ok(Self {
            severity_levels,
            shown: config.shown_emergencies,
            step: Duration::seconds(config.step_secs),
            districts,
            hospitals,
            total_fleet,
            clock,
            traffic,
            generator,
            queues: vec![VecDeque::new(); severity_levels as usize + 1],
            active: Vec::new(),
            rng: SimRng::new(DEFAULT_SEED),
        })
    }

    // ── Gym surface ───────────────────────────────────────────────────────

    /// Start a fresh episode over `[start, end)`: queues and in-flight
    /// ambulances cleared, fleets restored, traffic re-anchored to free
    /// flow.  The RNG stream is *not* reseeded; use [`seed`](Self::seed)
    /// for bit-identical replays.
    pub fn reset(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Observation {
        self.clock = SimClock::new(start, end, self.step);
        for h in self.hospitals.values_mut() {
            h.available = h.fleet_size;
        }
        for q in &mut self.queues {
            q.clear();
        }
        self.active.clear();
        self.traffic.anchor(start);
        self.observation()
    }

    /// Reseed the RNG stream.  Together with `reset` this makes an episode
    /// replayable action-for-action.
    pub fn seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Scale emergency generation rates from the next step onward.
    pub fn set_stress(&mut self, stress: f64) {
        self.generator.set_stress(stress);
    }

    pub fn severity_levels(&self) -> u8 {
        self.severity_levels
    }

    pub fn stress(&self) -> f64 {
        self.generator.stress()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now
    }

    pub fn steps(&self) -> u64 {
        self.clock.steps
    }

    /// Advance the simulation by one step under `action`.  Returns the next
    /// observation, the step reward, the termination flag, and counters.
    ///
    /// A malformed action (wrong length, unknown hospital id) is rejected
    /// before any state changes.
    pub fn step(&mut self, action: &Action) -> EnvResult<(Observation, f64, bool, StepInfo)> {
        self.validate(action)?;

        self.clock.advance();
        let now = self.clock.now;
        self.traffic.refresh(now, &mut self.rng);

        let mut info = StepInfo::default();
        let mut reward = 0.0;

        // 3. generation
        let fresh =
            self.generator
                .generate(&self.districts, now, self.clock.step_secs(), &mut self.rng)?;
        info.generated = fresh.len() as u32;
        for (tier, e) in fresh {
            self.queues[tier as usize].push_back(e);
        }

        // 4. objective reached: release reward, turn the ambulance around
        for a in &mut self.active {
            if a.phase == Phase::Outgoing && now >= a.pickup_at {
                reward += a.reward;
                a.phase = Phase::Incoming;
            }
        }

        // 5. hospital reached: credit availability, drop the record
        {
            let hospitals = &mut self.hospitals;
            self.active.retain(|a| {
                if a.phase == Phase::Incoming && now >= a.hospital_at {
                    if let Some(h) = hospitals.get_mut(&a.destination) {
                        h.available += 1;
                    }
                    false
                } else {
                    true
                }
            });
        }

        // 6. repositioning slot
        let start = action.start_hospitals[0];
        let end = action.end_hospitals[0];
        if !start.is_sentinel() && !end.is_sentinel() && self.take_ambulance(start) {
            let (from, from_district) = self.hospital_site(start);
            let (to, to_district) = self.hospital_site(end);
            let secs = estimate_travel_secs(
                &self.districts,
                &mut self.traffic,
                &mut self.rng,
                now,
                (from, from_district),
                (to, to_district),
            );
            self.active.push(ActiveAmbulance {
                phase: Phase::Incoming,
                pickup_at: now,
                hospital_at: now + secs_to_duration(secs),
                destination: end,
                reward: 0.0,
            });
            info.repositioned = 1;
        }

        // 7. emergency tiers, most severe index last
        for tier in 1..=self.severity_levels as usize {
            let start = action.start_hospitals[tier];
            if start.is_sentinel() || self.queues[tier].is_empty() {
                continue;
            }
            if !self.take_ambulance(start) {
                continue;
            }
            let end = match action.end_hospitals[tier] {
                e if e.is_sentinel() => start,
                e => e,
            };
            // take_ambulance succeeded, so the queue pop cannot be None here
            let Some(emergency) = self.queues[tier].pop_front() else {
                continue;
            };

            let (from, from_district) = self.hospital_site(start);
            let (to, to_district) = self.hospital_site(end);
            let ttobj = estimate_travel_secs(
                &self.districts,
                &mut self.traffic,
                &mut self.rng,
                now,
                (from, from_district),
                (emergency.location, emergency.district),
            );
            let tthospital = estimate_travel_secs(
                &self.districts,
                &mut self.traffic,
                &mut self.rng,
                now,
                (emergency.location, emergency.district),
                (to, to_district),
            );

            let pickup_at = now + secs_to_duration(ttobj);
            self.active.push(ActiveAmbulance {
                phase: Phase::Outgoing,
                pickup_at,
                hospital_at: pickup_at + secs_to_duration(tthospital),
                destination: end,
                reward: -ttobj * self.generator.severity_weight(tier as u8),
            });
            info.dispatched += 1;
        }

        info.queued = self.queues.iter().map(|q| q.len() as u32).sum();

        debug_assert_eq!(
            self.hospitals.values().map(|h| h.available).sum::<u32>()
                + self.active.len() as u32,
            self.total_fleet,
        );

        Ok((self.observation(), reward, self.clock.finished(), info))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn validate(&self, action: &Action) -> EnvResult<()> {
        let expected = self.severity_levels as usize + 1;
        if action.start_hospitals.len() != expected || action.end_hospitals.len() != expected {
            return Err(EnvError::ActionLength {
                expected,
                got: action.start_hospitals.len().min(action.end_hospitals.len()),
            });
        }
        for id in action.start_hospitals.iter().chain(&action.end_hospitals) {
            if !id.is_sentinel() && !self.hospitals.contains_key(id) {
                return Err(EnvError::UnknownHospital(*id));
            }
        }
        Ok(())
    }

    /// Decrement availability at `id` if an ambulance is parked there.
    fn take_ambulance(&mut self, id: HospitalId) -> bool {
        match self.hospitals.get_mut(&id) {
            Some(h) if h.available > 0 => {
                h.available -= 1;
                true
            }
            _ => false,
        }
    }

    fn hospital_site(&self, id: HospitalId) -> (Point, DistrictCode) {
        // ids are validated before any dispatch touches this
        self.hospitals
            .get(&id)
            .map(|h| (h.location, h.district))
            .unwrap_or((Point::new(0.0, 0.0), DistrictCode::UNASSIGNED))
    }

    fn observation(&self) -> Observation {
        Observation::build(
            &self.hospitals,
            &self.queues,
            &self.active,
            self.shown,
            &self.clock,
        )
    }

    #[cfg(test)]
    pub(crate) fn push_emergency(&mut self, e: Emergency) {
        self.queues[e.severity as usize].push_back(e);
    }

    #[cfg(test)]
    pub(crate) fn available_at(&self, id: HospitalId) -> u32 {
        self.hospitals.get(&id).map(|h| h.available).unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    #[cfg(test)]
    pub(crate) fn queue_len(&self, tier: u8) -> usize {
        self.queues[tier as usize].len()
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::milliseconds((secs * 1_000.0).round() as i64)
}

fn default_episode_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_episode_end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap_or_default()
}
