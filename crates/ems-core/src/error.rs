//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into `EmsError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `ems-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EmsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ems-*` crates.
pub type EmsResult<T> = Result<T, EmsError>;
