//! Plain data row types written by output backends.

use ts_sim::{StatValue, Statistics};

/// One observation of one statistic in one trial.
///
/// Hourly series are flattened to one row per hour; scalars have no hour.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub model:     String,
    pub trial:     u32,
    pub statistic: String,
    pub hour:      Option<u32>,
    pub value:     f64,
}

impl StatRow {
    /// Flatten a snapshot into long-format rows, in key order.
    pub fn from_statistics(model: &str, trial: u32, stats: &Statistics) -> Vec<StatRow> {
        let mut rows = Vec::with_capacity(stats.len());
        for (key, value) in stats.iter() {
            let row = |hour, value| StatRow {
                model: model.to_owned(),
                trial,
                statistic: key.to_owned(),
                hour,
                value,
            };
            match value {
                StatValue::Scalar(v) => rows.push(row(None, *v)),
                StatValue::Series(vs) => rows.extend(
                    vs.iter().enumerate().map(|(h, &v)| row(Some(h as u32), v)),
                ),
            }
        }
        rows
    }
}

/// One processed simulation event, as seen just before the vehicle acted.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    /// Minutes since the run started.
    pub time:    f64,
    pub kind:    &'static str,
    pub vehicle: String,
    pub route:   u32,
    pub stop:    String,
    pub onboard: u32,
    pub waiting: u32,
}
