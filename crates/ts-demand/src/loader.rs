//! CSV arrival-rate loader.
//!
//! # CSV format
//!
//! One row per origin/destination pair per rate interval.  Rows for the same
//! pair may appear in any order but their `interval` indices must form the
//! contiguous range `0..n`.
//!
//! ```csv
//! origin,destination,interval,rate_per_hour
//! Wegmans-Eastbound,Commons-Eastbound,0,12
//! Wegmans-Eastbound,Commons-Eastbound,1,20
//! Collegetown,Commons-Westbound,0,8
//! ```
//!
//! Every pair becomes an [`ArrivalSpec::Table`] using the caller's interval
//! length, even with a single interval, so a pair's arrivals stop once its
//! last interval has elapsed.  Stops are referenced by name; resolving them to `StopId`s is the
//! topology builder's job.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ArrivalSpec, DemandError};

/// Arrival specifications keyed by `(origin name, destination name)`.
pub type RateTable = BTreeMap<(String, String), ArrivalSpec>;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RateRecord {
    origin:        String,
    destination:   String,
    interval:      usize,
    rate_per_hour: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-pair arrival specifications from a CSV file.
pub fn load_rates_csv(path: &Path, interval_minutes: f64) -> Result<RateTable, DemandError> {
    let file = std::fs::File::open(path).map_err(DemandError::Io)?;
    load_rates_reader(file, interval_minutes)
}

/// Like [`load_rates_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for rate tables embedded
/// in a binary.
pub fn load_rates_reader<R: Read>(
    reader: R,
    interval_minutes: f64,
) -> Result<RateTable, DemandError> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_pair: BTreeMap<(String, String), BTreeMap<usize, f64>> = BTreeMap::new();

    for result in csv_reader.deserialize::<RateRecord>() {
        let row = result.map_err(|e| DemandError::Parse(e.to_string()))?;
        let pair = (row.origin.trim().to_owned(), row.destination.trim().to_owned());
        let intervals = by_pair.entry(pair).or_default();
        if intervals.insert(row.interval, row.rate_per_hour).is_some() {
            return Err(DemandError::Parse(format!(
                "duplicate interval {} for {} -> {}",
                row.interval, row.origin, row.destination
            )));
        }
    }

    // ── Build one ArrivalSpec per pair ────────────────────────────────────
    by_pair
        .into_iter()
        .map(|((origin, destination), intervals)| {
            // BTreeMap keys are sorted, so contiguity means key == position.
            if let Some((pos, _)) = intervals.keys().enumerate().find(|&(pos, &k)| pos != k) {
                return Err(DemandError::Parse(format!(
                    "{origin} -> {destination}: missing rate for interval {pos}"
                )));
            }
            let rates: Vec<f64> = intervals.into_values().collect();
            let spec = ArrivalSpec::table_with_interval(rates, interval_minutes);
            spec.validate()?;
            Ok(((origin, destination), spec))
        })
        .collect()
}
