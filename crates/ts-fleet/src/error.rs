use thiserror::Error;

use ts_core::RouteId;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle {vehicle:?}: schedule is empty")]
    EmptySchedule { vehicle: String },

    #[error("vehicle {vehicle:?}: schedule starts on {found} but the vehicle starts on {expected}")]
    ScheduleMismatch { vehicle: String, expected: RouteId, found: RouteId },

    #[error("vehicle {vehicle:?}: schedule window {window} minutes must be finite and > 0")]
    InvalidWindow { vehicle: String, window: f64 },

    #[error("vehicle {vehicle:?}: capacity must allow at least one passenger")]
    ZeroCapacity { vehicle: String },
}

pub type FleetResult<T> = Result<T, FleetError>;
