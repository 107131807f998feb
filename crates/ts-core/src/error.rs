//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `ts-core`.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {field} = {value} ({reason})")]
    Config {
        field:  &'static str,
        value:  f64,
        reason: &'static str,
    },

    #[error("vehicle capacity must be at least one passenger")]
    ZeroCapacity,

    #[error("invalid horizon {0}: must be finite and positive")]
    InvalidHorizon(f64),
}

/// Shorthand result type for `ts-core`.
pub type CoreResult<T> = Result<T, CoreError>;
