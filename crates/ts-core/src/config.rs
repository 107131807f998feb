//! Top-level simulation configuration.
//!
//! The capacity and speed numbers here are simulation parameters rather than
//! algorithmic requirements.  `SimConfig::default()` reproduces the behaviour
//! the simulator was calibrated with: 25 seats plus 10 standing, 20 km/h in
//! town, 6-minute long-haul legs.

use crate::{CoreError, CoreResult, MINUTES_PER_HOUR};

// ── Capacity ──────────────────────────────────────────────────────────────────

/// Seat and standing capacity of one vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capacity {
    pub seats:    u32,
    pub standing: u32,
}

impl Capacity {
    pub const fn new(seats: u32, standing: u32) -> Self {
        Self { seats, standing }
    }

    /// Total number of passengers the vehicle can hold.
    #[inline]
    pub fn max_cap(&self) -> u32 {
        self.seats + self.standing
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::new(25, 10)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Simulation parameters shared by every vehicle and stop in one network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Capacity given to vehicles that do not override it.
    pub capacity: Capacity,

    /// Nominal speed on short hops, in km/h.
    pub speed_kmh: f64,

    /// Hops at least this long (km) take `long_haul_minutes` instead of
    /// `distance / speed`.
    pub long_haul_km: f64,

    /// Fixed travel time of a long-haul hop, in minutes.
    pub long_haul_minutes: f64,

    /// Time each boarding passenger adds to the stop, in minutes.
    pub boarding_minutes: f64,

    /// Minimum time between a departure event and the vehicle actually
    /// leaving.  Boarding that finishes earlier triggers one extra pass.
    pub min_dwell_minutes: f64,

    /// Offset between consecutive vehicles' initial departures, in minutes.
    pub stagger_minutes: f64,

    /// Default length of one route-schedule window, in minutes.
    pub schedule_window_minutes: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            capacity:                Capacity::default(),
            speed_kmh:               20.0,
            long_haul_km:            2.0,
            long_haul_minutes:       6.0,
            boarding_minutes:        0.05,
            min_dwell_minutes:       0.5,
            stagger_minutes:         1.0,
            schedule_window_minutes: 180.0,
        }
    }
}

impl SimConfig {
    /// Reject configurations that would produce non-finite or backwards
    /// event times.
    pub fn validate(&self) -> CoreResult<()> {
        if self.capacity.max_cap() == 0 {
            return Err(CoreError::ZeroCapacity);
        }
        positive("speed_kmh", self.speed_kmh)?;
        positive("schedule_window_minutes", self.schedule_window_minutes)?;
        non_negative("long_haul_km", self.long_haul_km)?;
        non_negative("long_haul_minutes", self.long_haul_minutes)?;
        non_negative("boarding_minutes", self.boarding_minutes)?;
        non_negative("min_dwell_minutes", self.min_dwell_minutes)?;
        non_negative("stagger_minutes", self.stagger_minutes)?;
        Ok(())
    }

    /// Travel time in minutes for a hop of `distance_km`.
    #[inline]
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        if distance_km < self.long_haul_km {
            distance_km / self.speed_kmh * MINUTES_PER_HOUR
        } else {
            self.long_haul_minutes
        }
    }
}

fn positive(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config { field, value, reason: "must be finite and > 0" })
    }
}

fn non_negative(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config { field, value, reason: "must be finite and >= 0" })
    }
}
