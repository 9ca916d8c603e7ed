//! `ems-output` — episode output writers for the dispatch environment.
//!
//! The CSV backend creates `step_log.csv` (one row per step) and
//! `episode_summaries.csv` (one row per finished episode).  Backends
//! implement [`OutputWriter`] and are driven by [`EnvOutputObserver`],
//! which implements `ems_env::EnvObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ems_output::{EnvOutputObserver, EpisodeCsvWriter};
//!
//! let writer = EpisodeCsvWriter::new(Path::new("./output"))?;
//! let mut obs = EnvOutputObserver::new(writer);
//! run_episode(&mut env, &mut agent, &mut obs, start, end)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::EpisodeCsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EnvOutputObserver;
pub use row::{EpisodeSummaryRow, StepRow};
pub use writer::OutputWriter;
