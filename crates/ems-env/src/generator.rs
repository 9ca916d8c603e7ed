//! Poisson emergency generation.
//!
//! Each severity tier draws an independent Poisson count per step; the mean
//! is the tier's base frequency modulated by its own hour-of-day, weekday,
//! and month factors, the global `stress` multiplier, and the step length.
//! Every emergency picks a district from the tier's categorical district
//! weights and a uniform point inside it.  `stress` lets a trained agent be
//! evaluated against heavier or lighter caseloads without reconfiguring the
//! city.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::distributions::WeightedIndex;
use rand_distr::{Distribution, Poisson};

use ems_core::{DistrictCode, SimRng};
use ems_districts::DistrictMap;

use crate::config::SeverityConfig;
use crate::error::{EnvError, EnvResult};
use crate::state::Emergency;

#[derive(Clone, Debug)]
struct Tier {
    /// Emergencies per simulated second at stress 1.0.
    frequency: f64,
    severity: f64,
    hourly: Vec<f64>,
    daily: Vec<f64>,
    monthly: Vec<f64>,
    /// District codes in the same order as the weights below.
    codes: Vec<DistrictCode>,
    district_dist: WeightedIndex<f64>,
}

impl Tier {
    /// Combined calendar factor for the instant `now`.
    fn calendar_factor(&self, now: NaiveDateTime) -> f64 {
        self.hourly[now.hour() as usize]
            * self.daily[now.weekday().num_days_from_monday() as usize]
            * self.monthly[now.month0() as usize]
    }
}

#[derive(Debug)]
pub struct EmergencyGenerator {
    tiers: Vec<Tier>,
    stress: f64,
}

impl EmergencyGenerator {
    /// `severities` are the configured tiers in ascending order (tier ids
    /// start at 1); table lengths are checked by `CityConfig::validate`.
    /// A tier with an empty `district_prob` falls back to weighting every
    /// district by resident population (density × surface).
    pub fn new(severities: &[SeverityConfig], districts: &DistrictMap) -> EnvResult<Self> {
        let mut tiers = Vec::with_capacity(severities.len());
        for (idx, cfg) in severities.iter().enumerate() {
            let mut codes = Vec::new();
            let mut weights = Vec::new();
            if cfg.district_prob.is_empty() {
                for d in districts.iter() {
                    codes.push(d.code);
                    weights.push((d.density * d.surface_km2).max(0.0));
                }
            } else {
                for (&code, &weight) in &cfg.district_prob {
                    codes.push(DistrictCode(code));
                    weights.push(weight);
                }
            }
            let district_dist = WeightedIndex::new(&weights).map_err(|e| {
                EnvError::Config(format!("severity tier {}: district weights: {e}", idx + 1))
            })?;
            tiers.push(Tier {
                frequency: cfg.frequency,
                severity: cfg.severity,
                hourly: cfg.hourly_dist.clone(),
                daily: cfg.daily_dist.clone(),
                monthly: cfg.monthly_dist.clone(),
                codes,
                district_dist,
            });
        }
        Ok(Self { tiers, stress: 1.0 })
    }

    pub fn severity_levels(&self) -> u8 {
        self.tiers.len() as u8
    }

    /// Reward weight of a tier (`1..=severity_levels`); 0.0 for the
    /// repositioning tier.
    pub fn severity_weight(&self, tier: u8) -> f64 {
        if tier == 0 {
            return 0.0;
        }
        self.tiers
            .get(tier as usize - 1)
            .map(|t| t.severity)
            .unwrap_or(0.0)
    }

    pub fn stress(&self) -> f64 {
        self.stress
    }

    /// Scale all tier rates; negative values clamp to zero.
    pub fn set_stress(&mut self, stress: f64) {
        self.stress = stress.max(0.0);
    }

    /// Draw this step's emergencies.  Returns `(tier, emergency)` pairs in
    /// generation order so callers can append to per-tier FIFO queues.
    pub fn generate(
        &self,
        districts: &DistrictMap,
        now: NaiveDateTime,
        step_secs: f64,
        rng: &mut SimRng,
    ) -> EnvResult<Vec<(u8, Emergency)>> {
        let mut out = Vec::new();
        for (idx, tier) in self.tiers.iter().enumerate() {
            let mean = tier.frequency * tier.calendar_factor(now) * self.stress * step_secs;
            if mean <= 0.0 {
                continue;
            }
            let Ok(poisson) = Poisson::new(mean) else {
                continue;
            };
            let count = poisson.sample(rng.inner()) as u64;
            for _ in 0..count {
                let district = tier.codes[tier.district_dist.sample(rng.inner())];
                let location = districts.random_point_in(district, rng)?;
                out.push((
                    (idx + 1) as u8,
                    Emergency {
                        location,
                        district,
                        severity: (idx + 1) as u8,
                        created_at: now,
                    },
                ));
            }
        }
        Ok(out)
    }
}
