//! Topology construction error type.

use thiserror::Error;

use ts_core::StopId;
use ts_demand::DemandError;

/// Errors produced while assembling a `Topology`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("stop name {0:?} is already in use")]
    DuplicateStop(String),

    #[error("{0} not found in topology")]
    UnknownStop(StopId),

    #[error("no stop named {0:?}")]
    UnknownStopName(String),

    #[error("route {0} not found in topology")]
    UnknownRoute(u32),

    #[error("route number {0} is already in use")]
    DuplicateRoute(u32),

    #[error("route {route} needs at least two stops")]
    TooShort { route: u32 },

    #[error("route {route} is not a closed loop (first stop != last stop)")]
    OpenLoop { route: u32 },

    #[error("route {route}: {stops} stops need {} distances, got {distances}", stops - 1)]
    LengthMismatch { route: u32, stops: usize, distances: usize },

    #[error("route {route}: distance {value} is not finite and >= 0")]
    InvalidDistance { route: u32, value: f64 },

    #[error("{0} cannot generate passengers for itself")]
    SelfDemand(StopId),

    #[error("checkpoint {route} -> {target}: {reason}")]
    InvalidCheckpoint { route: u32, target: u32, reason: &'static str },

    #[error(transparent)]
    Demand(#[from] DemandError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
