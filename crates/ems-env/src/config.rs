//! City configuration: hospitals, district metadata, severity tiers, and
//! traffic parameters, loaded from JSON.
//!
//! The district *geometry* comes separately (GeoJSON rings via
//! [`ems_districts::load_district_rings`]); this file carries everything
//! else and is validated eagerly so a bad city fails at load time, not
//! mid-episode.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use ems_core::Point;
use ems_districts::{District, DistrictMap, DistrictRing};
use ems_traffic::TrafficParams;

use crate::error::{EnvError, EnvResult};

fn default_step_secs() -> i64 {
    60
}

fn default_shown() -> usize {
    10
}

fn default_update_period_secs() -> i64 {
    9000
}

fn default_max_load() -> f64 {
    100.0
}

fn default_max_avg_speed_kmh() -> f64 {
    60.0
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct HospitalConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub fleet_size: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DistrictConfig {
    pub name: String,
    pub surface_km2: f64,
    pub density: f64,
}

/// Per-tier generation parameters.
///
/// The Poisson mean for one step is `frequency · hourly_dist[hour] ·
/// daily_dist[weekday] · monthly_dist[month] · stress · step_secs`.
#[derive(Clone, Debug, Deserialize)]
pub struct SeverityConfig {
    /// Base emergencies per simulated second at stress 1.0, before the
    /// calendar factors.
    pub frequency: f64,
    /// Reward weight of the tier.
    pub severity: f64,
    /// 24 factors indexed by hour of day; all-ones means a flat caseload.
    #[serde(default = "ones_24")]
    pub hourly_dist: Vec<f64>,
    /// 7 factors, Monday first.
    #[serde(default = "ones_7")]
    pub daily_dist: Vec<f64>,
    /// 12 factors indexed by month − 1.
    #[serde(default = "ones_12")]
    pub monthly_dist: Vec<f64>,
    /// Per-district generation weights for this tier; zero-weight districts
    /// never fire.  Empty (the default) means "weight by resident
    /// population", i.e. density × surface of every district.
    #[serde(default)]
    pub district_prob: BTreeMap<u16, f64>,
}

fn ones(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

fn ones_24() -> Vec<f64> {
    ones(24)
}

fn ones_7() -> Vec<f64> {
    ones(7)
}

fn ones_12() -> Vec<f64> {
    ones(12)
}

#[derive(Clone, Debug, Deserialize)]
pub struct TrafficConfig {
    #[serde(default = "default_update_period_secs")]
    pub update_period_secs: i64,
    #[serde(default = "default_max_load")]
    pub max_load: f64,
    #[serde(default = "default_max_avg_speed_kmh")]
    pub max_avg_speed_kmh: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            update_period_secs: default_update_period_secs(),
            max_load: default_max_load(),
            max_avg_speed_kmh: default_max_avg_speed_kmh(),
        }
    }
}

// ── CityConfig ────────────────────────────────────────────────────────────────

/// Full city description.  Keys of `hospitals` and `districts` are the
/// numeric ids used throughout the simulation; 0 is reserved as the null
/// sentinel in both spaces and rejected by [`CityConfig::validate`].
#[derive(Clone, Debug, Deserialize)]
pub struct CityConfig {
    #[serde(default = "default_step_secs")]
    pub step_secs: i64,
    /// Emergencies per tier exposed in the observation.
    #[serde(default = "default_shown")]
    pub shown_emergencies: usize,
    pub hospitals: BTreeMap<u32, HospitalConfig>,
    pub districts: BTreeMap<u16, DistrictConfig>,
    /// Severity tiers in ascending order; tier ids start at 1.
    pub severities: Vec<SeverityConfig>,
    #[serde(default)]
    pub traffic: TrafficConfig,
}

impl CityConfig {
    pub fn from_json_str(raw: &str) -> EnvResult<Self> {
        let cfg: CityConfig =
            serde_json::from_str(raw).map_err(|e| EnvError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> EnvResult<Self> {
        let cfg: CityConfig =
            serde_json::from_reader(reader).map_err(|e| EnvError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EnvResult<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> EnvResult<()> {
        if self.step_secs <= 0 {
            return Err(EnvError::Config("step_secs must be positive".into()));
        }
        if self.hospitals.is_empty() {
            return Err(EnvError::Config("at least one hospital required".into()));
        }
        if self.hospitals.contains_key(&0) {
            return Err(EnvError::Config("hospital id 0 is reserved".into()));
        }
        if self.districts.contains_key(&0) {
            return Err(EnvError::Config("district code 0 is reserved".into()));
        }
        if self.severities.is_empty() {
            return Err(EnvError::Config("at least one severity tier required".into()));
        }
        for (idx, tier) in self.severities.iter().enumerate() {
            let tier_id = idx + 1;
            if tier.frequency < 0.0 {
                return Err(EnvError::Config(format!(
                    "severity tier {tier_id} has negative frequency"
                )));
            }
            if tier.severity <= 0.0 {
                return Err(EnvError::Config(format!(
                    "severity tier {tier_id} must weigh more than zero"
                )));
            }
            for (name, table, expected) in [
                ("hourly_dist", &tier.hourly_dist, 24),
                ("daily_dist", &tier.daily_dist, 7),
                ("monthly_dist", &tier.monthly_dist, 12),
            ] {
                if table.len() != expected {
                    return Err(EnvError::Config(format!(
                        "severity tier {tier_id}: {name} needs {expected} entries, got {}",
                        table.len()
                    )));
                }
                if table.iter().any(|f| !f.is_finite() || *f < 0.0) {
                    return Err(EnvError::Config(format!(
                        "severity tier {tier_id}: {name} factors must be finite and non-negative"
                    )));
                }
            }
            for (code, weight) in &tier.district_prob {
                if !self.districts.contains_key(code) {
                    return Err(EnvError::Config(format!(
                        "severity tier {tier_id}: district_prob names unknown district {code}"
                    )));
                }
                if !weight.is_finite() || *weight < 0.0 {
                    return Err(EnvError::Config(format!(
                        "severity tier {tier_id}: district_prob[{code}] must be finite and non-negative"
                    )));
                }
            }
            if !tier.district_prob.is_empty()
                && tier.district_prob.values().sum::<f64>() <= 0.0
            {
                return Err(EnvError::Config(format!(
                    "severity tier {tier_id}: district_prob weights sum to zero"
                )));
            }
        }
        for (id, h) in &self.hospitals {
            if !h.x.is_finite() || !h.y.is_finite() {
                return Err(EnvError::Config(format!(
                    "hospital {id} has non-finite coordinates"
                )));
            }
        }
        if self.traffic.max_load <= 0.0 || self.traffic.max_avg_speed_kmh <= 0.0 {
            return Err(EnvError::Config(
                "traffic max_load and max_avg_speed_kmh must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn traffic_params(&self) -> TrafficParams {
        TrafficParams {
            update_period: chrono::Duration::seconds(self.traffic.update_period_secs),
            max_load: self.traffic.max_load,
            max_avg_speed_kmh: self.traffic.max_avg_speed_kmh,
        }
    }

    pub fn hospital_point(&self, id: u32) -> Option<Point> {
        self.hospitals.get(&id).map(|h| Point { x: h.x, y: h.y })
    }

    /// Join configured district metadata with loaded rings into a
    /// [`DistrictMap`].  Rings without a metadata entry are rejected;
    /// metadata without geometry likewise.
    pub fn build_district_map(&self, rings: &[DistrictRing]) -> EnvResult<DistrictMap> {
        let mut districts = Vec::with_capacity(rings.len());
        for (code, ring) in rings {
            let meta = self.districts.get(&code.0).ok_or_else(|| {
                EnvError::Config(format!("ring for unconfigured district {}", code.0))
            })?;
            districts.push(District::new(
                *code,
                meta.name.clone(),
                meta.surface_km2,
                meta.density,
                ring,
            )?);
        }
        for code in self.districts.keys() {
            if !rings.iter().any(|(c, _)| c.0 == *code) {
                return Err(EnvError::Config(format!(
                    "district {code} configured but has no ring"
                )));
            }
        }
        Ok(DistrictMap::new(districts)?)
    }
}
