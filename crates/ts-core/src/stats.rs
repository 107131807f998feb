//! Time-weighted averages by the rectangle rule.
//!
//! Between two consecutive processed events the simulated state is constant,
//! so the integral of a quantity is updated as
//!
//! ```text
//! integral += (current_time - previous_time) * value_during_interval
//! ```
//!
//! The same interval is also split across hourly buckets so that
//! per-hour averages are exact even when an interval straddles an hour
//! boundary.

use crate::{MINUTES_PER_HOUR, SimTime, bucket_len, hour_buckets};

/// Running integral of a piecewise-constant quantity, overall and per hour.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWeighted {
    integral: f64,
    hourly:   Vec<f64>,
}

impl TimeWeighted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` held constant over `[from, to)`.
    ///
    /// Empty or backwards intervals contribute nothing.
    pub fn accumulate(&mut self, from: SimTime, to: SimTime, value: f64) {
        if to <= from || value == 0.0 {
            return;
        }
        self.integral += (to - from) * value;

        let mut t = from;
        while t < to {
            let hour = t.hour();
            let bucket_end = SimTime((hour + 1) as f64 * MINUTES_PER_HOUR);
            let end = to.min(bucket_end);
            if self.hourly.len() <= hour {
                self.hourly.resize(hour + 1, 0.0);
            }
            self.hourly[hour] += (end - t) * value;
            t = end;
        }
    }

    /// Raw integral (value × minutes).
    #[inline]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Average over `[0, horizon)`.  Zero for an empty horizon.
    pub fn average(&self, horizon: SimTime) -> f64 {
        if horizon.0 <= 0.0 {
            return 0.0;
        }
        self.integral / horizon.0
    }

    /// One average per hourly bucket of `[0, horizon)`, each normalised by
    /// the bucket's own length.
    pub fn hourly_averages(&self, horizon: SimTime) -> Vec<f64> {
        (0..hour_buckets(horizon))
            .map(|hour| {
                let len = bucket_len(hour, horizon);
                let sum = self.hourly.get(hour).copied().unwrap_or(0.0);
                if len > 0.0 { sum / len } else { 0.0 }
            })
            .collect()
    }

    /// Forget everything accumulated so far.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.hourly.clear();
    }
}
