//! `ts-sim`: discrete-event loop for the rust_ts transit simulator.
//!
//! # Event loop
//!
//! ```text
//! while queue.next_time() <= horizon:
//!   ① Pop      — earliest event; equal times in insertion order.
//!   ② Advance  — integrate occupancy, standing and queue lengths over
//!                [previous, t]; turn arrivals before t into passengers.
//!   ③ Schedule — vehicles whose schedule window changed request their
//!                prescribed route (switching later, at a checkpoint).
//!   ④ Dispatch — Departure → board + drive, returns the Arrival;
//!                Arrival   → switch / alight, returns the Departure.
//! then integrate [previous, horizon] and mark the run completed.
//! ```
//!
//! A single run is strictly sequential and deterministic for a given seed.
//! Independent runs share nothing, so repeated trials can be farmed out to
//! threads one `Network` per worker (see `ts-output`'s `Experiment`).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::{SimConfig, SimTime};
//! use ts_sim::{NetworkBuilder, VehicleSpec};
//!
//! let mut network = NetworkBuilder::new(SimConfig::default(), topology)
//!     .vehicle(VehicleSpec::new("Bus 1", 1))
//!     .build()?;
//! network.run(SimTime::from_hours(18.0), false)?;
//! let stats = network.collect_statistics()?;
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub mod observer;
pub mod queue;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use builder::{NetworkBuilder, ScheduleSpec, VehicleSpec};
pub use error::{SimError, SimResult};
pub use network::{Network, RunState};
pub use observer::{NoopObserver, SimObserver, TraceObserver};
pub use queue::EventQueue;
pub use statistics::{PassengerCounts, PathTally, PathTallies, StatValue, Statistics};
