use thiserror::Error;

use ts_core::CoreError;
use ts_fleet::FleetError;
use ts_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("topology error: {0}")]
    Network(#[from] NetworkError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("vehicle {vehicle:?} references unknown route {route}")]
    UnknownRoute { vehicle: String, route: u32 },

    #[error("network has already completed a run; call reset() first")]
    NotReset,

    #[error("statistics requested before a run completed")]
    NotCompleted,
}

pub type SimResult<T> = Result<T, SimError>;
