//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous and measured in **minutes** since the start of the
//! run, held in a `SimTime` newtype over `f64`.  Events are scheduled at
//! arbitrary fractional times (exponential arrivals, per-passenger boarding
//! time), so an integer tick like a fixed-step simulator would use does not
//! fit.
//!
//! `SimTime` implements `Ord` through `f64::total_cmp`, which makes it
//! usable as an ordered map key.  NaN never enters the system: every constructor
//! path goes through validated configuration or finite arithmetic.
//!
//! Hourly statistics are bucketed by `floor(minutes / 60)`.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

/// Minutes in one statistics bucket.
pub const MINUTES_PER_HOUR: f64 = 60.0;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulated time, in minutes since the run started.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Build from a number of hours.
    #[inline]
    pub fn from_hours(hours: f64) -> SimTime {
        SimTime(hours * MINUTES_PER_HOUR)
    }

    /// Index of the hourly statistics bucket containing `self`.
    #[inline]
    pub fn hour(self) -> usize {
        (self.0 / MINUTES_PER_HOUR).floor().max(0.0) as usize
    }

    /// Index of the fixed-length window of `window_minutes` containing `self`.
    #[inline]
    pub fn window(self, window_minutes: f64) -> u64 {
        (self.0 / window_minutes).floor().max(0.0) as u64
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Validate `self` as a run horizon.
    pub fn checked_horizon(self) -> CoreResult<SimTime> {
        if self.0.is_finite() && self.0 > 0.0 {
            Ok(self)
        } else {
            Err(CoreError::InvalidHorizon(self.0))
        }
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, minutes: f64) -> SimTime {
        SimTime(self.0 + minutes)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0);
        let hours = (total / MINUTES_PER_HOUR).floor() as u64;
        let minutes = total - hours as f64 * MINUTES_PER_HOUR;
        write!(f, "{hours:02}:{minutes:05.2}")
    }
}

// ── Hour buckets ──────────────────────────────────────────────────────────────

/// Number of hourly buckets needed to cover `[0, horizon)`; a trailing
/// partial hour gets its own bucket.
pub fn hour_buckets(horizon: SimTime) -> usize {
    if horizon.0 <= 0.0 {
        return 0;
    }
    (horizon.0 / MINUTES_PER_HOUR).ceil() as usize
}

/// Length in minutes of hourly bucket `hour` when the run ends at `horizon`.
/// Every bucket is 60 minutes except possibly the last one.
pub fn bucket_len(hour: usize, horizon: SimTime) -> f64 {
    let start = hour as f64 * MINUTES_PER_HOUR;
    (horizon.0 - start).clamp(0.0, MINUTES_PER_HOUR)
}
