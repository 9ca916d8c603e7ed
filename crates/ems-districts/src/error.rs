//! District-subsystem error type.

use thiserror::Error;

use ems_core::DistrictCode;

/// Errors produced by `ems-districts`.
#[derive(Debug, Error)]
pub enum DistrictError {
    #[error("district {0} not found")]
    UnknownDistrict(DistrictCode),

    #[error("district code 0 is reserved for unassigned geometry")]
    ReservedCode,

    #[error("duplicate district code {0}")]
    DuplicateCode(DistrictCode),

    #[error("district {0} has a degenerate boundary ring ({1} points; need at least 3)")]
    DegenerateRing(DistrictCode, usize),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DistrictResult<T> = Result<T, DistrictError>;
