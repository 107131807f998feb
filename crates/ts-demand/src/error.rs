use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("arrival rate {0} is not a finite, non-negative number")]
    InvalidRate(f64),

    #[error("rate table has no intervals")]
    EmptyTable,

    #[error("rate-table interval {0} minutes must be finite and > 0")]
    InvalidInterval(f64),

    #[error("rate file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;
