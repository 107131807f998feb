//! Simulation observer trait for tracing and data collection.

use tracing::debug;

use ts_core::{Event, EventKind, SimTime};
use ts_fleet::Fleet;
use ts_network::Topology;

/// Callbacks invoked by [`Network::run_with`][crate::Network::run_with].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers get read-only access; they
/// cannot change the outcome of a run.
pub trait SimObserver {
    /// Called once after arrival streams are generated and initial
    /// departures are queued.
    fn on_run_start(&mut self, _horizon: SimTime) {}

    /// Called for every processed event after statistics were integrated up
    /// to `event.time` and schedules applied, before the owning vehicle
    /// handles it.
    fn on_event(&mut self, _event: &Event, _topology: &Topology, _fleet: &Fleet) {}

    /// Called once after the tail up to `horizon` has been integrated.
    fn on_run_end(&mut self, _horizon: SimTime, _topology: &Topology, _fleet: &Fleet) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Emits one `tracing::debug!` record per processed event.
///
/// Used by [`Network::run`][crate::Network::run] when `debug` is set.
#[derive(Default)]
pub struct TraceObserver {
    pub events: u64,
}

impl SimObserver for TraceObserver {
    fn on_event(&mut self, event: &Event, topology: &Topology, fleet: &Fleet) {
        self.events += 1;
        let vehicle = fleet.get(event.vehicle);
        let stop = topology.stop(event.stop);
        let action = match event.kind {
            EventKind::Departure => "departs",
            EventKind::Arrival => "arrives at",
        };
        debug!(
            time = %event.time,
            route = topology.route(vehicle.route()).number,
            onboard = vehicle.occupancy(),
            waiting = stop.num_waiting(),
            "{} {action} {}",
            vehicle.name,
            stop.name,
        );
    }

    fn on_run_end(&mut self, horizon: SimTime, _topology: &Topology, _fleet: &Fleet) {
        debug!(horizon = %horizon, events = self.events, "trace complete");
    }
}
