//! The stop and route arena, and its builder.
//!
//! Stops and routes are stored in `Vec`s indexed by `StopId` / `RouteId`.
//! Everything that refers to another entity holds an index, never a live
//! reference, so the arena can be mutated stop by stop during a run while
//! routes stay shared and read-only.

use std::collections::BTreeMap;

use ts_core::{RouteId, SimTime, StopId};
use ts_demand::{ArrivalSpec, RateTable};

use crate::{Checkpoint, NetworkError, NetworkResult, Route, Stop};

// ── Topology ──────────────────────────────────────────────────────────────────

/// All stops and routes of one network.
///
/// Do not construct directly; use [`TopologyBuilder`].
#[derive(Clone, Debug)]
pub struct Topology {
    stops:  Vec<Stop>,
    routes: Vec<Route>,
}

impl Topology {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    #[inline]
    pub fn stop_mut(&mut self, id: StopId) -> &mut Stop {
        &mut self.stops[id.index()]
    }

    #[inline]
    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stops_mut(&mut self) -> &mut [Stop] {
        &mut self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to one stop alongside shared access to every route.
    ///
    /// This is the borrow a vehicle needs while boarding.
    pub fn stop_and_routes(&mut self, id: StopId) -> (&mut Stop, &[Route]) {
        (&mut self.stops[id.index()], &self.routes)
    }

    pub fn stop_by_name(&self, name: &str) -> Option<StopId> {
        self.stops.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn route_by_number(&self, number: u32) -> Option<RouteId> {
        self.routes.iter().find(|r| r.number == number).map(|r| r.id)
    }

    /// Regenerate every arrival stream for a run ending at `horizon`.
    pub fn materialise(&mut self, horizon: SimTime, seed: u64) {
        let stop_count = self.stops.len();
        for stop in &mut self.stops {
            stop.materialise(horizon, seed, stop_count);
        }
    }

    /// Clear every stop's queue, streams and statistics.
    pub fn reset(&mut self) {
        for stop in &mut self.stops {
            stop.reset();
        }
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Incrementally assemble a [`Topology`].
///
/// Every `add_*` call validates its input immediately and reports a
/// [`NetworkError`] on a contract violation; `build` cannot fail.
///
/// # Example
///
/// ```
/// use ts_demand::ArrivalSpec;
/// use ts_network::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// let a = b.add_stop("A").unwrap();
/// let c = b.add_stop("C").unwrap();
/// b.add_demand(a, c, ArrivalSpec::constant(12.0)).unwrap();
/// b.add_route(1, vec![a, c, a], vec![1.0, 1.0]).unwrap();
/// let topology = b.build();
/// assert_eq!(topology.stop_count(), 2);
/// ```
#[derive(Default)]
pub struct TopologyBuilder {
    stops:     Vec<Stop>,
    routes:    Vec<Route>,
    by_number: BTreeMap<u32, RouteId>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.  Names must be unique.
    pub fn add_stop(&mut self, name: impl Into<String>) -> NetworkResult<StopId> {
        let name = name.into();
        if self.stops.iter().any(|s| s.name == name) {
            return Err(NetworkError::DuplicateStop(name));
        }
        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop::new(id, name));
        Ok(id)
    }

    pub fn stop_by_name(&self, name: &str) -> Option<StopId> {
        self.stops.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// Passengers appear at `origin` bound for `destination` according to
    /// `spec`.  A second call for the same pair replaces the first.
    pub fn add_demand(
        &mut self,
        origin: StopId,
        destination: StopId,
        spec: ArrivalSpec,
    ) -> NetworkResult<()> {
        self.check_stop(origin)?;
        self.check_stop(destination)?;
        if origin == destination {
            return Err(NetworkError::SelfDemand(origin));
        }
        spec.validate()?;
        self.stops[origin.index()].set_demand(destination, spec);
        Ok(())
    }

    /// Attach every pair of a loaded rate table, resolving stop names.
    pub fn add_rates(&mut self, rates: &RateTable) -> NetworkResult<()> {
        for ((origin, destination), spec) in rates {
            let o = self.resolve(origin)?;
            let d = self.resolve(destination)?;
            self.add_demand(o, d, spec.clone())?;
        }
        Ok(())
    }

    /// Add a closed-loop route.
    ///
    /// `stops` must start and end at the same stop and `distances` must hold
    /// one finite, non-negative entry per hop.
    pub fn add_route(
        &mut self,
        number: u32,
        stops: Vec<StopId>,
        distances: Vec<f64>,
    ) -> NetworkResult<RouteId> {
        if self.by_number.contains_key(&number) {
            return Err(NetworkError::DuplicateRoute(number));
        }
        if stops.len() < 2 {
            return Err(NetworkError::TooShort { route: number });
        }
        if stops.first() != stops.last() {
            return Err(NetworkError::OpenLoop { route: number });
        }
        if distances.len() != stops.len() - 1 {
            return Err(NetworkError::LengthMismatch {
                route:     number,
                stops:     stops.len(),
                distances: distances.len(),
            });
        }
        for &stop in &stops {
            self.check_stop(stop)?;
        }
        if let Some(&value) = distances.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
            return Err(NetworkError::InvalidDistance { route: number, value });
        }

        let id = RouteId(self.routes.len() as u32);
        self.routes.push(Route { id, number, stops, distances, checkpoints: BTreeMap::new() });
        self.by_number.insert(number, id);
        Ok(id)
    }

    /// Allow vehicles on route `from` to switch to route `to`.
    ///
    /// The switch happens once a vehicle whose next stop index on `from` is
    /// `next_index` has covered `threshold` km from that stop; it then heads
    /// for `stops[resume_index]` on `to`.
    pub fn add_checkpoint(
        &mut self,
        from: u32,
        to: u32,
        next_index: usize,
        threshold: f64,
        resume_index: usize,
    ) -> NetworkResult<()> {
        let from_id = *self.by_number.get(&from).ok_or(NetworkError::UnknownRoute(from))?;
        let to_id = *self.by_number.get(&to).ok_or(NetworkError::UnknownRoute(to))?;
        let invalid = |reason| NetworkError::InvalidCheckpoint { route: from, target: to, reason };

        if from == to {
            return Err(invalid("a route cannot switch to itself"));
        }
        if !(1..self.routes[from_id.index()].len()).contains(&next_index) {
            return Err(invalid("next stop index out of range"));
        }
        if !(1..self.routes[to_id.index()].len()).contains(&resume_index) {
            return Err(invalid("resume index out of range"));
        }
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(invalid("threshold must be finite and >= 0"));
        }

        self.routes[from_id.index()]
            .checkpoints
            .insert((to, next_index), Checkpoint { threshold, resume_index });
        Ok(())
    }

    pub fn build(self) -> Topology {
        Topology { stops: self.stops, routes: self.routes }
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn check_stop(&self, id: StopId) -> NetworkResult<()> {
        if id.index() < self.stops.len() {
            Ok(())
        } else {
            Err(NetworkError::UnknownStop(id))
        }
    }

    fn resolve(&self, name: &str) -> NetworkResult<StopId> {
        self.stop_by_name(name)
            .ok_or_else(|| NetworkError::UnknownStopName(name.to_owned()))
    }
}
