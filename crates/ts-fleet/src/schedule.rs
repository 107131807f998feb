//! Fixed multi-hour route assignments.

use ts_core::{RouteId, SimTime};

/// One prescribed route per window of `window_minutes`, starting at time 0.
///
/// Times past the last window keep the last entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSchedule {
    pub window_minutes: f64,
    pub routes:         Vec<RouteId>,
}

impl RouteSchedule {
    pub fn new(window_minutes: f64, routes: Vec<RouteId>) -> Self {
        Self { window_minutes, routes }
    }

    /// Index of the window containing `time`.
    #[inline]
    pub fn window(&self, time: SimTime) -> u64 {
        time.window(self.window_minutes)
    }

    /// Route prescribed for `window`, clamped to the last entry.
    pub fn route_for_window(&self, window: u64) -> Option<RouteId> {
        let last = self.routes.len().checked_sub(1)?;
        let idx = usize::try_from(window).map_or(last, |w| w.min(last));
        Some(self.routes[idx])
    }

    #[inline]
    pub fn route_at(&self, time: SimTime) -> Option<RouteId> {
        self.route_for_window(self.window(time))
    }
}
