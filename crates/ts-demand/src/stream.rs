//! `ArrivalStream`: a materialised queue of future arrival timestamps.
//!
//! Generation happens once per run, before the event loop starts.  The
//! owning stop then drains the stream front-to-back as simulated time
//! advances; timestamps are never regenerated mid-run.

use std::collections::VecDeque;

use rand_distr::{Distribution, Exp};

use ts_core::{SimTime, StreamRng};

use crate::ArrivalSpec;

/// Arrival timestamps for one origin/destination pair, ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrivalStream {
    pending: VecDeque<SimTime>,
}

impl ArrivalStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from explicit timestamps (sorted on construction).
    pub fn from_times(mut times: Vec<SimTime>) -> Self {
        times.sort();
        Self { pending: times.into() }
    }

    /// Materialise every arrival of `spec` strictly before `horizon`.
    ///
    /// Constant rates sum independent exponential gaps from time 0.  Rate
    /// tables keep one running clock: within interval `i` gaps are drawn at
    /// `rates[i]` until the clock passes the interval end, so the arrival
    /// that overshoots into the next interval is kept.  A zero-rate interval
    /// moves the clock to its end without generating anything.
    pub fn generate(spec: &ArrivalSpec, horizon: SimTime, rng: &mut StreamRng) -> Self {
        let mut pending = VecDeque::new();
        match spec {
            ArrivalSpec::Constant { rate_per_hour } => {
                let Some(gap) = per_minute(*rate_per_hour) else {
                    return Self { pending };
                };
                let mut t = 0.0;
                loop {
                    t += gap.sample(rng.inner());
                    if t >= horizon.0 {
                        break;
                    }
                    pending.push_back(SimTime(t));
                }
            }
            ArrivalSpec::Table { rates_per_hour, interval_minutes } => {
                let mut t = 0.0;
                'intervals: for (i, &rate) in rates_per_hour.iter().enumerate() {
                    let end = (i + 1) as f64 * interval_minutes;
                    match per_minute(rate) {
                        None => t = f64::max(t, end),
                        Some(gap) => {
                            while t < end {
                                t += gap.sample(rng.inner());
                                if t >= horizon.0 {
                                    break 'intervals;
                                }
                                pending.push_back(SimTime(t));
                            }
                        }
                    }
                    if end >= horizon.0 {
                        break;
                    }
                }
            }
        }
        Self { pending }
    }

    /// Remove and return every timestamp strictly earlier than `time`.
    pub fn drain_before(&mut self, time: SimTime) -> impl Iterator<Item = SimTime> + '_ {
        let n = self.pending.partition_point(|&t| t < time);
        self.pending.drain(..n)
    }

    /// The next pending timestamp, if any.
    pub fn peek(&self) -> Option<SimTime> {
        self.pending.front().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Exponential inter-arrival distribution in minutes, or `None` for a zero
/// rate (no arrivals).
fn per_minute(rate_per_hour: f64) -> Option<Exp<f64>> {
    if rate_per_hour <= 0.0 {
        return None;
    }
    Exp::new(rate_per_hour / 60.0).ok()
}
