//! Cross-trial summaries.
//!
//! Per-trial snapshots are reduced to one [`Summary`] per statistic, and the
//! headline families (waiting time, people waiting, vehicle occupancy) to a
//! single mean per trial so models can be compared side by side.

use std::collections::BTreeMap;

use ts_sim::Statistics;

use crate::TrialResult;

/// Groups of scalar statistics that are compared across models.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatFamily {
    /// `{stop} overall avg waiting time`
    WaitingTime,
    /// `{stop} avg people waiting`
    PeopleWaiting,
    /// `{vehicle} avg occupancy` (path occupancy excluded)
    VehicleOccupancy,
}

impl StatFamily {
    pub const ALL: [StatFamily; 3] =
        [StatFamily::WaitingTime, StatFamily::PeopleWaiting, StatFamily::VehicleOccupancy];

    pub fn matches(self, key: &str) -> bool {
        if key.contains(" hourly ") {
            return false;
        }
        match self {
            StatFamily::WaitingTime => key.ends_with(" overall avg waiting time"),
            StatFamily::PeopleWaiting => key.ends_with(" avg people waiting"),
            StatFamily::VehicleOccupancy => key.ends_with(" avg occupancy") && !key.contains(" -> "),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatFamily::WaitingTime => "waiting time",
            StatFamily::PeopleWaiting => "people waiting",
            StatFamily::VehicleOccupancy => "vehicle occupancy",
        }
    }
}

/// Unweighted mean of the scalars in `family`; `None` if none are present.
pub fn family_mean(stats: &Statistics, family: StatFamily) -> Option<f64> {
    let values: Vec<f64> = stats
        .iter()
        .filter(|(key, _)| family.matches(key))
        .filter_map(|(_, value)| value.as_scalar())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Descriptive statistics of one quantity over trials.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub n:       usize,
    pub mean:    f64,
    /// Sample standard deviation; zero for a single sample.
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
}

impl Summary {
    pub fn from_samples(samples: &[f64]) -> Option<Summary> {
        let n = samples.len();
        if n == 0 {
            return None;
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Summary { n, mean, std_dev, min, max })
    }
}

/// One [`Summary`] per scalar statistic key.
///
/// A key missing from some trials (e.g. a waiting time nobody contributed
/// to) is summarised over the trials that have it.
pub fn summarise(results: &[TrialResult]) -> BTreeMap<String, Summary> {
    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for result in results {
        for (key, value) in result.statistics.iter() {
            if let Some(v) = value.as_scalar() {
                samples.entry(key).or_default().push(v);
            }
        }
    }
    samples
        .into_iter()
        .filter_map(|(key, vs)| Summary::from_samples(&vs).map(|s| (key.to_owned(), s)))
        .collect()
}

/// One [`Summary`] per hour for every hourly series key.
pub fn summarise_hourly(results: &[TrialResult]) -> BTreeMap<String, Vec<Summary>> {
    let mut samples: BTreeMap<&str, Vec<Vec<f64>>> = BTreeMap::new();
    for result in results {
        for (key, value) in result.statistics.iter() {
            let Some(series) = value.as_series() else { continue };
            let hours = samples.entry(key).or_default();
            if hours.len() < series.len() {
                hours.resize_with(series.len(), Vec::new);
            }
            for (h, &v) in series.iter().enumerate() {
                hours[h].push(v);
            }
        }
    }
    samples
        .into_iter()
        .map(|(key, hours)| {
            let summaries = hours.iter().filter_map(|vs| Summary::from_samples(vs)).collect();
            (key.to_owned(), summaries)
        })
        .collect()
}

/// Per-family summary of the per-trial family means.
pub fn summarise_families(results: &[TrialResult]) -> BTreeMap<StatFamily, Summary> {
    StatFamily::ALL
        .into_iter()
        .filter_map(|family| {
            let means: Vec<f64> =
                results.iter().filter_map(|r| family_mean(&r.statistics, family)).collect();
            Summary::from_samples(&means).map(|s| (family, s))
        })
        .collect()
}
