//! Per-vehicle movement state and the records vehicles hand back to the
//! simulation loop.

use ts_core::{Event, RouteId, SimTime, StopId};

/// Whether the vehicle is standing at a stop or driving a hop.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehiclePhase {
    /// Between an arrival and the following departure.
    #[default]
    AtStop,
    /// Between a departure and the following arrival.
    Traveling,
}

/// A route switch waiting for its checkpoint.
///
/// `accumulated` counts km driven since the checkpoint's keyed stop.  A
/// request made while the vehicle stands at a stop is not yet `armed`: the
/// next hop leads to the keyed stop and is not counted.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingRouteChange {
    pub target:       RouteId,
    pub accumulated:  f64,
    pub threshold:    f64,
    pub resume_index: usize,
    pub armed:        bool,
}

impl PendingRouteChange {
    /// Tolerance used when comparing `accumulated` with `threshold`.
    pub const EPSILON: f64 = 1e-9;

    #[inline]
    pub fn reached(&self) -> bool {
        (self.accumulated - self.threshold).abs() < Self::EPSILON
    }

    #[inline]
    pub fn overshot(&self) -> bool {
        self.accumulated > self.threshold + Self::EPSILON
    }
}

/// Outcome of [`Vehicle::request_route_change`].
///
/// [`Vehicle::request_route_change`]: crate::Vehicle::request_route_change
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RouteChangeRequest {
    /// The vehicle already runs the requested route.
    AlreadyOnRoute,
    /// A change to the same route is already waiting for its checkpoint.
    AlreadyPending,
    /// The checkpoint was found and the change is now pending.
    Recorded,
    /// The current route has no checkpoint towards the target from the
    /// vehicle's next stop; the request was dropped.
    NoCheckpoint,
}

/// What a departure produced: the arrival event plus the leg observed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Departure {
    /// Arrival event at `to`.
    pub event:       Event,
    pub from:        StopId,
    pub to:          StopId,
    /// Passengers aboard when the vehicle pulled away.
    pub occupancy:   usize,
    /// When boarding finished and the vehicle pulled away.
    pub departed_at: SimTime,
}
