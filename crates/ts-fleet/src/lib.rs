//! `ts-fleet`: vehicles and their route assignments.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`state`]    | `VehiclePhase`, `PendingRouteChange`, `Departure`, request outcome |
//! | [`schedule`] | `RouteSchedule` — one route per fixed time window             |
//! | [`vehicle`]  | `Vehicle`, `Arrival` — depart / arrive / request_route_change  |
//! | [`store`]    | `Fleet` — `Vec<Vehicle>` indexed by `VehicleId`                |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                                |
//!
//! # Vehicle cycle
//!
//! Every vehicle alternates between two events:
//!
//! 1. **Departure** at stop `s`: board passengers (one pass, plus a single
//!    extra pass if boarding finished before the minimum dwell), add the hop
//!    to the odometer, and return the arrival event at the next stop.
//! 2. **Arrival** at stop `s'`: resolve a pending route change, advance the
//!    next-stop pointer, let passengers off, and return the departure event
//!    at `s'` for the same instant.
//!
//! The caller (ts-sim) owns the event queue; vehicles only ever produce the
//! one successor of the event they were handed.

pub mod error;
pub mod schedule;
pub mod state;
pub mod store;
pub mod vehicle;


pub use error::{FleetError, FleetResult};
pub use schedule::RouteSchedule;
pub use state::{Departure, PendingRouteChange, RouteChangeRequest, VehiclePhase};
pub use store::Fleet;
pub use vehicle::{Arrival, Vehicle};
