//! Scheduled occurrences that drive simulated time forward.

use std::fmt;

use crate::{SimTime, StopId, VehicleId};

/// What happens to the owning vehicle when the event fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The vehicle boards passengers at `stop` and leaves for its next stop.
    Departure,
    /// The vehicle reaches `stop`, resolves any pending route change and
    /// lets passengers off.
    Arrival,
}

/// An immutable record of one scheduled vehicle occurrence.
///
/// The simulation loop never mutates an `Event`: it pops one, hands it to the
/// owning vehicle, and pushes the successor the vehicle returns.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time:    SimTime,
    pub vehicle: VehicleId,
    pub stop:    StopId,
    pub kind:    EventKind,
}

impl Event {
    #[inline]
    pub fn departure(time: SimTime, vehicle: VehicleId, stop: StopId) -> Self {
        Self { time, vehicle, stop, kind: EventKind::Departure }
    }

    #[inline]
    pub fn arrival(time: SimTime, vehicle: VehicleId, stop: StopId) -> Self {
        Self { time, vehicle, stop, kind: EventKind::Arrival }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:?} {} @ {}", self.time, self.kind, self.vehicle, self.stop)
    }
}
