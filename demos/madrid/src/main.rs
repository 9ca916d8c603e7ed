//! `madrid` — one simulated week of random dispatch over a Madrid-like city.
//!
//! 17 hospitals, 21 districts on a 7×3 grid, 5 severity tiers.  A
//! `RandomAgent` drives the environment for 7 days of 60-second steps;
//! per-step rows land in `output/madrid/step_log.csv`.
//!
//! Run with:
//!   cargo run -p madrid --release

mod city;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::{Duration, NaiveDate};

use ems_core::HospitalId;
use ems_env::{CityEnv, RandomAgent, run_episode};
use ems_output::{EnvOutputObserver, EpisodeCsvWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const ENV_SEED:   u64 = 42;
const AGENT_SEED: u64 = 1042;
const SIM_DAYS:   i64 = 7;
const STRESS:     f64 = 1.0;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== ems_dt  madrid — 1-week random dispatch ===");

    // 1. City.
    let config = city::config();
    let rings = city::rings();
    println!(
        "City: {} hospitals, {} districts, {} severity tiers",
        config.hospitals.len(),
        config.districts.len(),
        config.severities.len(),
    );

    let hospital_ids: Vec<HospitalId> =
        config.hospitals.keys().map(|&id| HospitalId(id)).collect();
    let fleet: u32 = config.hospitals.values().map(|h| h.fleet_size).sum();
    println!("Fleet: {fleet} ambulances  |  Seed: {ENV_SEED}  |  Stress: {STRESS}");

    // 2. Environment and agent.
    let mut env = CityEnv::new(&config, &rings)?;
    env.seed(ENV_SEED);
    env.set_stress(STRESS);
    let severity_levels = env.severity_levels();
    let mut agent = RandomAgent::new(hospital_ids, severity_levels, AGENT_SEED);

    // 3. Output.
    let out_dir = Path::new("output/madrid");
    std::fs::create_dir_all(out_dir)?;
    let mut observer = EnvOutputObserver::new(EpisodeCsvWriter::new(out_dir)?);

    // 4. One simulated week.
    let start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow::anyhow!("bad episode start date"))?;
    let end = start + Duration::days(SIM_DAYS);
    println!("Episode: {start} → {end} (60-second steps)");
    println!();

    let t_run = Instant::now();
    let total_reward = run_episode(&mut env, &mut agent, &mut observer, start, end)?;
    let elapsed = t_run.elapsed().as_secs_f64();

    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Stats.
    let steps = env.steps();
    println!("Simulation complete in {elapsed:.3}s ({steps} steps)");
    println!("Total reward:     {total_reward:.1}");
    println!("Reward per step:  {:.3}", total_reward / steps as f64);
    println!("Step log:         {}", out_dir.join("step_log.csv").display());

    Ok(())
}
