//! Error types for ts-output.

use thiserror::Error;

use ts_sim::SimError;

/// Errors that can occur when running experiments or writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("trial {trial} failed: {source}")]
    Trial {
        trial:  u32,
        #[source]
        source: SimError,
    },

    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
