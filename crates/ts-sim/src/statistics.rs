//! Flat statistics snapshots.
//!
//! A completed run is summarised as a map from human-readable key to either a
//! scalar or an hourly series:
//!
//! | Key                                        | Value                        |
//! |--------------------------------------------|------------------------------|
//! | `{vehicle} distance`                       | km driven                    |
//! | `{vehicle} avg occupancy` / `hourly …`     | time-weighted passengers     |
//! | `{vehicle} avg standing` / `hourly …`      | time-weighted standees       |
//! | `{vehicle} avg waiting time`               | mean wait of its boarders    |
//! | `{stop} avg people waiting` / `hourly …`   | time-weighted queue length   |
//! | `{stop} to {dest} avg waiting time`        | only if anyone boarded       |
//! | `{stop} overall avg waiting time`          | only if anyone boarded       |
//! | `{from} -> {to} avg occupancy` / `hourly …`| load observed at departure   |
//! | `total distance`, `passengers …`           | fleet-wide totals            |

use std::collections::BTreeMap;

use ts_core::{SimTime, StopId, hour_buckets};
use ts_fleet::Fleet;
use ts_network::Topology;

// ── Values ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum StatValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl StatValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Scalar(v) => Some(*v),
            StatValue::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            StatValue::Scalar(_) => None,
            StatValue::Series(v) => Some(v),
        }
    }
}

/// Snapshot returned by [`Network::collect_statistics`].
///
/// [`Network::collect_statistics`]: crate::Network::collect_statistics
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Statistics {
    values: BTreeMap<String, StatValue>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), StatValue::Scalar(value));
    }

    pub fn insert_series(&mut self, key: impl Into<String>, values: Vec<f64>) {
        self.values.insert(key.into(), StatValue::Series(values));
    }

    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.values.get(key)
    }

    pub fn scalar(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StatValue::as_scalar)
    }

    pub fn series(&self, key: &str) -> Option<&[f64]> {
        self.get(key).and_then(StatValue::as_series)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── Path tallies ──────────────────────────────────────────────────────────────

/// Occupancy observed on departures along one directed stop pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathTally {
    pub sum:          f64,
    pub count:        u64,
    pub hourly_sum:   Vec<f64>,
    pub hourly_count: Vec<u64>,
}

impl PathTally {
    /// Count one departure at `at`, scheduled no later than `horizon`.
    ///
    /// A departure exactly at the horizon lands in the final hour, so the
    /// hourly counts always add up to `count`.
    pub fn record(&mut self, at: SimTime, horizon: SimTime, occupancy: usize) {
        let hour = at.hour().min(hour_buckets(horizon).saturating_sub(1));
        if self.hourly_sum.len() <= hour {
            self.hourly_sum.resize(hour + 1, 0.0);
            self.hourly_count.resize(hour + 1, 0);
        }
        self.sum += occupancy as f64;
        self.count += 1;
        self.hourly_sum[hour] += occupancy as f64;
        self.hourly_count[hour] += 1;
    }

    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Per-hour averages over `[0, horizon)`; hours without departures are 0.
    pub fn hourly_averages(&self, horizon: SimTime) -> Vec<f64> {
        (0..hour_buckets(horizon))
            .map(|h| match self.hourly_count.get(h).copied() {
                Some(n) if n > 0 => self.hourly_sum[h] / n as f64,
                _ => 0.0,
            })
            .collect()
    }
}

pub type PathTallies = BTreeMap<(StopId, StopId), PathTally>;

// ── Passenger accounting ──────────────────────────────────────────────────────

/// Where every generated passenger is at a point in time.
///
/// After a completed run `generated == alighted + waiting + onboard`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerCounts {
    pub generated: u64,
    pub alighted:  u64,
    pub waiting:   u64,
    pub onboard:   u64,
}

impl PassengerCounts {
    pub fn is_conserved(&self) -> bool {
        self.generated == self.alighted + self.waiting + self.onboard
    }
}

// ── Collection ────────────────────────────────────────────────────────────────

pub(crate) fn collect(
    horizon: SimTime,
    topology: &Topology,
    fleet: &Fleet,
    paths: &PathTallies,
    counts: PassengerCounts,
) -> Statistics {
    let mut stats = Statistics::new();

    let mut total_distance = 0.0;
    for v in fleet.iter() {
        let name = &v.name;
        total_distance += v.distance();
        stats.insert_scalar(format!("{name} distance"), v.distance());
        stats.insert_scalar(format!("{name} avg occupancy"), v.occupancy_stats().average(horizon));
        stats.insert_series(
            format!("{name} hourly avg occupancy"),
            v.occupancy_stats().hourly_averages(horizon),
        );
        stats.insert_scalar(format!("{name} avg standing"), v.standing_stats().average(horizon));
        stats.insert_series(
            format!("{name} hourly avg standing"),
            v.standing_stats().hourly_averages(horizon),
        );
        if v.boarded() > 0 {
            stats.insert_scalar(
                format!("{name} avg waiting time"),
                v.waiting_total() / v.boarded() as f64,
            );
        }
    }

    for stop in topology.stops() {
        let name = &stop.name;
        stats.insert_scalar(
            format!("{name} avg people waiting"),
            stop.queue_length().average(horizon),
        );
        stats.insert_series(
            format!("{name} hourly avg people waiting"),
            stop.queue_length().hourly_averages(horizon),
        );
        for (dest, tally) in stop.tallies() {
            if let Some(avg) = tally.average() {
                let dest_name = &topology.stop(*dest).name;
                stats.insert_scalar(format!("{name} to {dest_name} avg waiting time"), avg);
            }
        }
        if let Some(avg) = stop.waiting_total().average() {
            stats.insert_scalar(format!("{name} overall avg waiting time"), avg);
        }
    }

    for ((from, to), tally) in paths {
        let Some(avg) = tally.average() else { continue };
        let key = format!("{} -> {}", topology.stop(*from).name, topology.stop(*to).name);
        stats.insert_scalar(format!("{key} avg occupancy"), avg);
        stats.insert_series(format!("{key} hourly avg occupancy"), tally.hourly_averages(horizon));
    }

    stats.insert_scalar("total distance", total_distance);
    stats.insert_scalar("passengers generated", counts.generated as f64);
    stats.insert_scalar("passengers alighted", counts.alighted as f64);
    stats.insert_scalar("passengers waiting", counts.waiting as f64);
    stats.insert_scalar("passengers onboard", counts.onboard as f64);
    stats
}
