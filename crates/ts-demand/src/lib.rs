//! `ts-demand`: passenger arrival specifications, streams, and CSV loading.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`spec`]     | `ArrivalSpec` (constant rate or piecewise-constant table)  |
//! | [`stream`]   | `ArrivalStream` — materialised, consumable timestamps      |
//! | [`loader`]   | `load_rates_csv`, `load_rates_reader`                      |
//! | [`error`]    | `DemandError`, `DemandResult<T>`                           |
//!
//! # Arrival model (summary)
//!
//! Each origin/destination pair is a renewal process with exponential
//! inter-arrival times.  Rates are in arrivals per hour; time is in minutes:
//!
//! ```text
//! constant:  t_{k+1} = t_k + Exp(rate / 60)
//! table:     rate switches to rates[i] while t < (i + 1) * interval
//! ```
//!
//! Streams are materialised once per run for the whole horizon and drained
//! by the owning stop as simulated time advances.

pub mod error;
pub mod loader;
pub mod spec;
pub mod stream;


pub use error::{DemandError, DemandResult};
pub use loader::{RateTable, load_rates_csv, load_rates_reader};
pub use spec::{ArrivalSpec, DEFAULT_INTERVAL_MINUTES};
pub use stream::ArrivalStream;
