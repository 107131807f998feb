//! How passengers for one origin/destination pair arrive.

use crate::{DemandError, DemandResult};

/// Default length of one rate-table interval: three hours.
pub const DEFAULT_INTERVAL_MINUTES: f64 = 180.0;

/// Arrival specification for a single origin/destination stream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalSpec {
    /// Stationary Poisson arrivals at `rate_per_hour`.
    Constant { rate_per_hour: f64 },

    /// Piecewise-constant rates: `rates_per_hour[i]` applies to
    /// `[i * interval_minutes, (i + 1) * interval_minutes)`.  No arrivals are
    /// generated after the last interval.
    Table {
        rates_per_hour:   Vec<f64>,
        interval_minutes: f64,
    },
}

impl ArrivalSpec {
    pub fn constant(rate_per_hour: f64) -> Self {
        ArrivalSpec::Constant { rate_per_hour }
    }

    /// A rate table with the default three-hour interval.
    pub fn table(rates_per_hour: Vec<f64>) -> Self {
        Self::table_with_interval(rates_per_hour, DEFAULT_INTERVAL_MINUTES)
    }

    pub fn table_with_interval(rates_per_hour: Vec<f64>, interval_minutes: f64) -> Self {
        ArrivalSpec::Table { rates_per_hour, interval_minutes }
    }

    /// Reject negative, non-finite, or empty specifications.
    pub fn validate(&self) -> DemandResult<()> {
        match self {
            ArrivalSpec::Constant { rate_per_hour } => check_rate(*rate_per_hour),
            ArrivalSpec::Table { rates_per_hour, interval_minutes } => {
                if rates_per_hour.is_empty() {
                    return Err(DemandError::EmptyTable);
                }
                if !(interval_minutes.is_finite() && *interval_minutes > 0.0) {
                    return Err(DemandError::InvalidInterval(*interval_minutes));
                }
                rates_per_hour.iter().try_for_each(|&r| check_rate(r))
            }
        }
    }

    /// Expected number of arrivals over `[0, horizon_minutes)`.
    pub fn expected_arrivals(&self, horizon_minutes: f64) -> f64 {
        match self {
            ArrivalSpec::Constant { rate_per_hour } => rate_per_hour * horizon_minutes / 60.0,
            ArrivalSpec::Table { rates_per_hour, interval_minutes } => rates_per_hour
                .iter()
                .enumerate()
                .map(|(i, rate)| {
                    let start = i as f64 * interval_minutes;
                    let len = (horizon_minutes - start).clamp(0.0, *interval_minutes);
                    rate * len / 60.0
                })
                .sum(),
        }
    }
}

fn check_rate(rate: f64) -> DemandResult<()> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(DemandError::InvalidRate(rate))
    }
}
