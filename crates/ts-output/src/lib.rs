//! `ts-output`: statistics export and repeated-trial experiments for the
//! rust_ts transit simulator.
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`row`]        | `StatRow` (long format), `EventRow`                       |
//! | [`writer`]     | `OutputWriter` trait                                      |
//! | [`csv`]        | `CsvWriter` — `statistics.csv`, `events.csv`              |
//! | [`observer`]   | `EventLogObserver` — `SimObserver` → `OutputWriter`       |
//! | [`experiment`] | `Experiment` — seeded trials, optionally on Rayon         |
//! | [`summary`]    | cross-trial summaries and statistic families              |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvWriter, Experiment};
//!
//! let experiment = Experiment::new(SimTime::from_hours(18.0), 20, 1);
//! let trials = experiment.run("baseline", || build_network())?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! experiment.write(&trials, &mut writer)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod experiment;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use experiment::{Experiment, TrialResult};
pub use observer::EventLogObserver;
pub use row::{EventRow, StatRow};
pub use summary::{StatFamily, Summary, family_mean, summarise, summarise_families, summarise_hourly};
pub use writer::OutputWriter;
