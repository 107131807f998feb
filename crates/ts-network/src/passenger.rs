//! A single trip request.

use ts_core::{SimTime, StopId};

/// Where a passenger is in its trip.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    Waiting,
    Standing,
    Seated,
    Arrived,
}

/// One trip from `origin` to `destination`.
///
/// A passenger is owned by exactly one container at a time: its origin
/// stop's queue until it boards, then the vehicle's manifest until it
/// alights, after which it is dropped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub origin:       StopId,
    pub destination:  StopId,
    pub created_at:   SimTime,
    /// Minutes between creation and boarding; `None` until boarded.
    pub waiting_time: Option<f64>,
    pub state:        PassengerState,
}

impl Passenger {
    pub fn new(origin: StopId, destination: StopId, created_at: SimTime) -> Self {
        Self { origin, destination, created_at, waiting_time: None, state: PassengerState::Waiting }
    }

    /// Record boarding at `at`.
    pub fn board(&mut self, at: SimTime, seated: bool) {
        self.waiting_time = Some(at.since(self.created_at));
        self.state = if seated { PassengerState::Seated } else { PassengerState::Standing };
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.state == PassengerState::Waiting
    }
}
