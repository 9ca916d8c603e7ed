//! Episode-engine error type.

use thiserror::Error;

use ems_core::HospitalId;
use ems_districts::DistrictError;

/// Errors produced by `ems-env`.
///
/// Configuration variants are fatal at construction time; `ActionLength` and
/// `UnknownHospital` reject a `step` call before any state is mutated.
/// Exhausted resources (empty queues, zero availability) are normal no-op
/// outcomes and never surface here.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("action length {got} does not match severity levels + 1 = {expected}")]
    ActionLength { expected: usize, got: usize },

    #[error("action references unknown {0}")]
    UnknownHospital(HospitalId),

    #[error("district error: {0}")]
    District(#[from] DistrictError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EnvResult<T> = Result<T, EnvError>;
