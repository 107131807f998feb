//! The `Network` struct and its event loop.

use tracing::info;

use ts_core::{Event, EventKind, SimConfig, SimTime};
use ts_fleet::Fleet;
use ts_network::Topology;

use crate::statistics::{self, PassengerCounts, PathTallies, Statistics};
use crate::{EventQueue, NoopObserver, SimError, SimObserver, SimResult, TraceObserver};

/// Lifecycle of a network between resets.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RunState {
    /// Built or reset; ready to run.
    Fresh,
    /// A run reached its horizon.  Statistics may be collected.
    Completed { horizon: SimTime },
}

/// One closed transit network: topology, fleet, and the pending events.
///
/// Each processed event is handed to its vehicle, which returns exactly one
/// successor, so the queue always holds one event per vehicle.
///
/// ```text
/// run(horizon):
///   materialise arrival streams, queue staggered initial departures
///   while next event time <= horizon:
///     ① integrate time-weighted statistics over [previous, t], refresh stops
///     ② request schedule-driven route changes at window crossings
///     ③ observer.on_event
///     ④ vehicle.depart / vehicle.arrive → push successor
///   integrate the tail [previous, horizon]; mark completed
/// ```
///
/// Create via [`NetworkBuilder`][crate::NetworkBuilder].
#[derive(Debug)]
pub struct Network {
    pub(crate) config:   SimConfig,
    pub(crate) topology: Topology,
    pub(crate) fleet:    Fleet,

    queue:    EventQueue,
    previous: SimTime,
    paths:    PathTallies,
    alighted: u64,
    state:    RunState,
}

impl Network {
    pub(crate) fn new(config: SimConfig, topology: Topology, fleet: Fleet) -> Self {
        Self {
            config,
            topology,
            fleet,
            queue:    EventQueue::new(),
            previous: SimTime::ZERO,
            paths:    PathTallies::new(),
            alighted: 0,
            state:    RunState::Fresh,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the next event lies beyond `horizon` minutes.
    ///
    /// `debug` logs every processed event at `DEBUG` level; it never changes
    /// the outcome.
    pub fn run(&mut self, horizon: SimTime, debug: bool) -> SimResult<()> {
        if debug {
            self.run_with(horizon, &mut TraceObserver::default())
        } else {
            self.run_with(horizon, &mut NoopObserver)
        }
    }

    /// Like [`run`][Self::run] with custom observer callbacks.
    ///
    /// # Errors
    ///
    /// [`SimError::NotReset`] if a run already completed, or a config error
    /// for a non-finite or non-positive horizon.
    pub fn run_with<O: SimObserver>(&mut self, horizon: SimTime, observer: &mut O) -> SimResult<()> {
        if let RunState::Completed { .. } = self.state {
            return Err(SimError::NotReset);
        }
        let horizon = horizon.checked_horizon()?;

        info!(
            stops = self.topology.stop_count(),
            routes = self.topology.route_count(),
            vehicles = self.fleet.len(),
            seed = self.config.seed,
            horizon = %horizon,
            "run started"
        );

        self.topology.materialise(horizon, self.config.seed);
        self.queue_initial_departures();
        observer.on_run_start(horizon);

        while self.queue.peek_time().is_some_and(|t| t <= horizon) {
            let Some(event) = self.queue.pop() else { break };
            self.process(event, horizon, observer);
        }

        self.advance_to(horizon);
        self.state = RunState::Completed { horizon };
        observer.on_run_end(horizon, &self.topology, &self.fleet);

        let counts = self.passenger_counts();
        info!(
            generated = counts.generated,
            alighted = counts.alighted,
            waiting = counts.waiting,
            onboard = counts.onboard,
            "run completed"
        );
        Ok(())
    }

    /// Snapshot of every statistic of the completed run.
    ///
    /// # Errors
    ///
    /// [`SimError::NotCompleted`] unless a run has reached its horizon since
    /// the last reset.
    pub fn collect_statistics(&self) -> SimResult<Statistics> {
        let RunState::Completed { horizon } = self.state else {
            return Err(SimError::NotCompleted);
        };
        Ok(statistics::collect(
            horizon,
            &self.topology,
            &self.fleet,
            &self.paths,
            self.passenger_counts(),
        ))
    }

    /// Return to the freshly built state: empty queues and manifests,
    /// vehicles on their starting routes, every statistic zeroed.
    pub fn reset(&mut self) {
        self.topology.reset();
        self.fleet.reset();
        self.queue.clear();
        self.previous = SimTime::ZERO;
        self.paths.clear();
        self.alighted = 0;
        self.state = RunState::Fresh;
    }

    /// Reset and use `seed` for the next run.
    pub fn reseed(&mut self, seed: u64) {
        self.reset();
        self.config.seed = seed;
    }

    pub fn passenger_counts(&self) -> PassengerCounts {
        PassengerCounts {
            generated: self.topology.stops().iter().map(|s| s.generated()).sum(),
            alighted:  self.alighted,
            waiting:   self.topology.stops().iter().map(|s| s.num_waiting() as u64).sum(),
            onboard:   self.fleet.iter().map(|v| v.occupancy() as u64).sum(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Events currently pending.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn paths(&self) -> &PathTallies {
        &self.paths
    }

    // ── Event processing ──────────────────────────────────────────────────

    fn queue_initial_departures(&mut self) {
        for (i, v) in self.fleet.iter().enumerate() {
            let start = self.topology.route(v.route()).stop_at(0);
            let time = SimTime(i as f64 * self.config.stagger_minutes);
            self.queue.push(Event::departure(time, v.id, start));
        }
    }

    fn process<O: SimObserver>(&mut self, event: Event, horizon: SimTime, observer: &mut O) {
        self.advance_to(event.time);
        self.fleet.apply_schedules(event.time, self.topology.routes());
        observer.on_event(&event, &self.topology, &self.fleet);

        let vehicle = self.fleet.get_mut(event.vehicle);
        let next = match event.kind {
            EventKind::Departure => {
                let (stop, routes) = self.topology.stop_and_routes(event.stop);
                let dep = vehicle.depart(&event, stop, routes, &self.config);
                self.paths
                    .entry((dep.from, dep.to))
                    .or_default()
                    .record(event.time, horizon, dep.occupancy);
                dep.event
            }
            EventKind::Arrival => {
                let arrival = vehicle.arrive(&event, self.topology.routes());
                self.alighted += arrival.alighted.len() as u64;
                arrival.event
            }
        };
        self.queue.push(next);
    }

    /// Integrate every time-weighted quantity over `[previous, time]` with
    /// the state that held during it, then refresh every stop.
    fn advance_to(&mut self, time: SimTime) {
        if time > self.previous {
            self.fleet.integrate(self.previous, time);
            for stop in self.topology.stops_mut() {
                stop.integrate(self.previous, time);
            }
            self.previous = time;
        }
        for stop in self.topology.stops_mut() {
            stop.update(time);
        }
    }
}
