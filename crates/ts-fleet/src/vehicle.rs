//! The vehicle state machine.

use tracing::{debug, warn};

use ts_core::{Capacity, Event, RouteId, SimConfig, SimTime, TimeWeighted, VehicleId};
use ts_network::{Passenger, PassengerState, Route, Stop};

use crate::{
    Departure, FleetError, FleetResult, PendingRouteChange, RouteChangeRequest, RouteSchedule,
    VehiclePhase,
};

/// What an arrival produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    /// Departure event at the same stop and time.
    pub event:       Event,
    /// Passengers that got off, in state `Arrived`.
    pub alighted:    Vec<Passenger>,
    /// The route switched to, if a pending change executed here.
    pub switched_to: Option<RouteId>,
}

/// One vehicle of the fleet.
///
/// Routes and stops are passed into each operation by the owner of the
/// topology; the vehicle itself only stores indices into it.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:   VehicleId,
    pub name: String,

    capacity:    Capacity,
    start_route: RouteId,
    route:       RouteId,
    /// Index into the current route's stop list of the stop being driven
    /// towards (or, at a stop, the one to leave for next).  Never 0.
    next_index:  usize,
    phase:       VehiclePhase,
    manifest:    Vec<Passenger>,
    distance:    f64,
    pending:     Option<PendingRouteChange>,
    schedule:    Option<RouteSchedule>,

    // ── Statistics ────────────────────────────────────────────────────────
    occupancy:     TimeWeighted,
    standing:      TimeWeighted,
    boarded:       u64,
    alighted:      u64,
    waiting_total: f64,
}

impl Vehicle {
    /// Create a vehicle starting on `route` at next-stop index 1.
    ///
    /// # Errors
    ///
    /// Fails if `capacity` holds nobody, or if `schedule` is empty, has a bad
    /// window, or does not start on `route`.
    pub fn new(
        id: VehicleId,
        name: impl Into<String>,
        route: RouteId,
        capacity: Capacity,
        schedule: Option<RouteSchedule>,
    ) -> FleetResult<Self> {
        let name = name.into();
        if capacity.max_cap() == 0 {
            return Err(FleetError::ZeroCapacity { vehicle: name });
        }
        if let Some(s) = &schedule {
            if !(s.window_minutes.is_finite() && s.window_minutes > 0.0) {
                return Err(FleetError::InvalidWindow { vehicle: name, window: s.window_minutes });
            }
            match s.routes.first() {
                None => return Err(FleetError::EmptySchedule { vehicle: name }),
                Some(&first) if first != route => {
                    return Err(FleetError::ScheduleMismatch {
                        vehicle:  name,
                        expected: route,
                        found:    first,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            id,
            name,
            capacity,
            start_route: route,
            route,
            next_index: 1,
            phase: VehiclePhase::AtStop,
            manifest: Vec::new(),
            distance: 0.0,
            pending: None,
            schedule,
            occupancy: TimeWeighted::new(),
            standing: TimeWeighted::new(),
            boarded: 0,
            alighted: 0,
            waiting_total: 0.0,
        })
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// Board at `stop` and leave for the next stop on the current route.
    ///
    /// One boarding pass runs at the event time.  If it finishes before
    /// `event.time + min_dwell`, exactly one more pass runs at that earliest
    /// departure time.  The stop's queue length is integrated up to that
    /// time first, so passengers the extra pass generates but leaves behind
    /// are not counted as waiting before they appeared.
    pub fn depart(
        &mut self,
        event: &Event,
        stop: &mut Stop,
        routes: &[Route],
        config: &SimConfig,
    ) -> Departure {
        let earliest = event.time + config.min_dwell_minutes;
        let mut done = self.boarding_pass(stop, routes, event.time, config.boarding_minutes);
        if done < earliest {
            stop.integrate_to(earliest);
            done = self.boarding_pass(stop, routes, earliest, config.boarding_minutes);
        }

        let route = &routes[self.route.index()];
        let hop = route.hop_to(self.next_index);
        let to = route.stop_at(self.next_index);

        self.distance += hop;
        if let Some(pending) = &mut self.pending {
            if pending.armed {
                pending.accumulated += hop;
            } else {
                pending.armed = true;
            }
        }
        self.phase = VehiclePhase::Traveling;

        Departure {
            event:       Event::arrival(done + config.travel_minutes(hop), self.id, to),
            from:        event.stop,
            to,
            occupancy:   self.manifest.len(),
            departed_at: done,
        }
    }

    /// Reach `event.stop`: resolve any pending route change, advance the
    /// next-stop pointer and let passengers off.
    pub fn arrive(&mut self, event: &Event, routes: &[Route]) -> Arrival {
        self.phase = VehiclePhase::AtStop;
        let switched_to = self.execute_route_change(routes);

        let (mut off, stay): (Vec<_>, Vec<_>) =
            self.manifest.drain(..).partition(|p| p.destination == event.stop);
        self.manifest = stay;
        for p in &mut off {
            p.state = PassengerState::Arrived;
        }
        self.alighted += off.len() as u64;
        self.reseat();

        Arrival {
            event: Event::departure(event.time, self.id, event.stop),
            alighted: off,
            switched_to,
        }
    }

    /// Ask to move to route `target` at the next matching checkpoint.
    ///
    /// A request for the route already driven, or for the change already
    /// pending, does nothing.  Otherwise the current route's checkpoint for
    /// `(target number, next_index)` is recorded with a zeroed odometer,
    /// replacing any other pending change.
    ///
    /// A recorded change is not guaranteed to happen.  If the vehicle
    /// reaches a stop with the odometer already past the checkpoint
    /// threshold, the change is dropped with a warning and the vehicle stays
    /// on its current route; boarding then goes back to checking the current
    /// route instead of the target.
    pub fn request_route_change(&mut self, target: RouteId, routes: &[Route]) -> RouteChangeRequest {
        if target == self.route {
            return RouteChangeRequest::AlreadyOnRoute;
        }
        if self.pending.is_some_and(|p| p.target == target) {
            return RouteChangeRequest::AlreadyPending;
        }

        let current = &routes[self.route.index()];
        let target_number = routes[target.index()].number;
        match current.checkpoint(target_number, self.next_index) {
            Some(cp) => {
                self.pending = Some(PendingRouteChange {
                    target,
                    accumulated:  0.0,
                    threshold:    cp.threshold,
                    resume_index: cp.resume_index,
                    armed:        self.phase == VehiclePhase::Traveling,
                });
                debug!(
                    vehicle = %self.name,
                    from = current.number,
                    to = target_number,
                    next_index = self.next_index,
                    threshold = cp.threshold,
                    "route change pending"
                );
                RouteChangeRequest::Recorded
            }
            None => {
                warn!(
                    vehicle = %self.name,
                    from = current.number,
                    to = target_number,
                    next_index = self.next_index,
                    "no checkpoint for route change; request rejected"
                );
                RouteChangeRequest::NoCheckpoint
            }
        }
    }

    /// Integrate occupancy and standing over `[from, to)`.
    pub fn integrate(&mut self, from: SimTime, to: SimTime) {
        self.occupancy.accumulate(from, to, self.manifest.len() as f64);
        self.standing.accumulate(from, to, self.standing_count() as f64);
    }

    /// Return to the starting route with an empty manifest and zeroed
    /// statistics.  The schedule is kept.
    pub fn reset(&mut self) {
        self.route = self.start_route;
        self.next_index = 1;
        self.phase = VehiclePhase::AtStop;
        self.manifest.clear();
        self.distance = 0.0;
        self.pending = None;
        self.occupancy.reset();
        self.standing.reset();
        self.boarded = 0;
        self.alighted = 0;
        self.waiting_total = 0.0;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn route(&self) -> RouteId {
        self.route
    }

    pub fn start_route(&self) -> RouteId {
        self.start_route
    }

    /// The route boarding passengers are checked against: the pending
    /// target if a change is waiting, else the current route.
    pub fn effective_route(&self) -> RouteId {
        self.pending.map_or(self.route, |p| p.target)
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn phase(&self) -> VehiclePhase {
        self.phase
    }

    pub fn pending(&self) -> Option<&PendingRouteChange> {
        self.pending.as_ref()
    }

    pub fn schedule(&self) -> Option<&RouteSchedule> {
        self.schedule.as_ref()
    }

    pub fn manifest(&self) -> &[Passenger] {
        &self.manifest
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.manifest.len()
    }

    /// Passengers beyond the seat count.
    #[inline]
    pub fn standing_count(&self) -> usize {
        self.manifest.len().saturating_sub(self.capacity.seats as usize)
    }

    /// Cumulative distance driven this run, in km.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn occupancy_stats(&self) -> &TimeWeighted {
        &self.occupancy
    }

    pub fn standing_stats(&self) -> &TimeWeighted {
        &self.standing
    }

    pub fn boarded(&self) -> u64 {
        self.boarded
    }

    pub fn alighted(&self) -> u64 {
        self.alighted
    }

    /// Summed waiting time of everyone who boarded this vehicle, in minutes.
    pub fn waiting_total(&self) -> f64 {
        self.waiting_total
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    /// One FIFO pass over `stop`'s queue starting at `start`.  Returns the
    /// boarding clock after the last boarder.
    fn boarding_pass(
        &mut self,
        stop: &mut Stop,
        routes: &[Route],
        start: SimTime,
        per_passenger: f64,
    ) -> SimTime {
        stop.update(start);

        let effective = &routes[self.effective_route().index()];
        let max_cap = self.capacity.max_cap() as usize;
        let seats = self.capacity.seats as usize;
        let mut onboard = self.manifest.len();
        let mut clock = start;

        let boarded = stop.admit(|p| {
            if onboard >= max_cap || !effective.contains(p.destination) || p.created_at > clock {
                return false;
            }
            p.board(clock, onboard < seats);
            clock = clock + per_passenger;
            onboard += 1;
            true
        });

        self.boarded += boarded.len() as u64;
        self.waiting_total += boarded.iter().filter_map(|p| p.waiting_time).sum::<f64>();
        self.manifest.extend(boarded);
        clock
    }

    /// Switch routes if the pending change has reached its threshold,
    /// otherwise advance along the current route.
    fn execute_route_change(&mut self, routes: &[Route]) -> Option<RouteId> {
        if let Some(pending) = self.pending {
            if pending.reached() {
                self.route = pending.target;
                self.next_index = pending.resume_index;
                self.pending = None;
                debug!(vehicle = %self.name, route = routes[pending.target.index()].number, "route switched");
                return Some(pending.target);
            }
            if pending.overshot() {
                warn!(
                    vehicle = %self.name,
                    to = routes[pending.target.index()].number,
                    accumulated = pending.accumulated,
                    threshold = pending.threshold,
                    "route-change checkpoint missed; request dropped"
                );
                self.pending = None;
            }
        }
        self.next_index = routes[self.route.index()].advance(self.next_index);
        None
    }

    /// Seats go to the longest-aboard passengers.
    fn reseat(&mut self) {
        let seats = self.capacity.seats as usize;
        for (i, p) in self.manifest.iter_mut().enumerate() {
            p.state = if i < seats { PassengerState::Seated } else { PassengerState::Standing };
        }
    }
}
