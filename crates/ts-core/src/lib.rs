//! `ts-core`: foundational types for the `rust_ts` transit simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It intentionally
//! has no `ts-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StopId`, `RouteId`, `VehicleId`                      |
//! | [`time`]        | `SimTime`, hour-bucket helpers                        |
//! | [`event`]       | `Event`, `EventKind`                                  |
//! | [`config`]      | `SimConfig`, `Capacity`                               |
//! | [`stats`]       | `TimeWeighted` rectangle-rule integrator              |
//! | [`rng`]         | `StreamRng` (per arrival stream)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod stats;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Capacity, SimConfig};
pub use error::{CoreError, CoreResult};
pub use event::{Event, EventKind};
pub use ids::{RouteId, StopId, VehicleId};
pub use rng::StreamRng;
pub use stats::TimeWeighted;
pub use time::{MINUTES_PER_HOUR, SimTime, bucket_len, hour_buckets};
