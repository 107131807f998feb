//! `ts-network`: the static side of a transit network plus its waiting
//! passengers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`passenger`] | `Passenger`, `PassengerState`                             |
//! | [`stop`]      | `Stop` (arrival streams, FIFO queue, waiting tallies)     |
//! | [`route`]     | `Route`, `Checkpoint`                                     |
//! | [`topology`]  | `Topology` arena, `TopologyBuilder`                       |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on plain data types.       |

pub mod error;
pub mod passenger;
pub mod route;
pub mod stop;
pub mod topology;


pub use error::{NetworkError, NetworkResult};
pub use passenger::{Passenger, PassengerState};
pub use route::{Checkpoint, Route};
pub use stop::{DestinationTally, Stop};
pub use topology::{Topology, TopologyBuilder};
