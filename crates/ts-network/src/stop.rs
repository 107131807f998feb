//! A stop: passenger generation, the FIFO waiting queue, and waiting-time
//! tallies.
//!
//! # Arrival lifecycle
//!
//! ```text
//! materialise(horizon, seed)   one ArrivalStream per destination, whole run
//!        │
//!        ▼
//! update(t)                    timestamps < t become Passengers, in time order
//!        │
//!        ▼
//! admit(accept)                FIFO pass; accepted passengers leave the queue
//! ```
//!
//! Streams are materialised once per run.  `update` only ever moves
//! timestamps out of the streams, so calling it repeatedly with
//! non-decreasing times is idempotent.

use std::collections::{BTreeMap, VecDeque};

use ts_core::{SimTime, StopId, StreamRng, TimeWeighted};
use ts_demand::{ArrivalSpec, ArrivalStream};

use crate::Passenger;

/// Waiting time accumulated by passengers bound for one destination.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationTally {
    /// Sum of waiting times, in minutes.
    pub waiting_sum: f64,
    /// Number of passengers that boarded.
    pub count:       u64,
}

impl DestinationTally {
    /// Mean waiting time, or `None` when nobody boarded.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.waiting_sum / self.count as f64)
    }
}

/// Demand attached to one destination: its specification and this run's
/// materialised timestamps.
#[derive(Clone, Debug)]
struct Demand {
    destination: StopId,
    spec:        ArrivalSpec,
    stream:      ArrivalStream,
}

#[derive(Clone, Debug)]
pub struct Stop {
    pub id:   StopId,
    pub name: String,

    /// Sorted by destination.
    demand: Vec<Demand>,
    queue:  VecDeque<Passenger>,

    queue_length:  TimeWeighted,
    /// Queue length is integrated up to here, never past `horizon`.
    integrated_to: SimTime,
    horizon:       SimTime,
    tallies:       BTreeMap<StopId, DestinationTally>,
    generated:     u64,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name:         name.into(),
            demand:       Vec::new(),
            queue:        VecDeque::new(),
            queue_length:  TimeWeighted::new(),
            integrated_to: SimTime::ZERO,
            horizon:       SimTime(f64::INFINITY),
            tallies:       BTreeMap::new(),
            generated:     0,
        }
    }

    // ── Demand ────────────────────────────────────────────────────────────

    /// Attach (or replace) the arrival specification towards `destination`.
    pub fn set_demand(&mut self, destination: StopId, spec: ArrivalSpec) {
        match self.demand.binary_search_by_key(&destination, |d| d.destination) {
            Ok(pos) => self.demand[pos].spec = spec,
            Err(pos) => self.demand.insert(
                pos,
                Demand { destination, spec, stream: ArrivalStream::new() },
            ),
        }
    }

    /// `(destination, spec)` pairs in destination order.
    pub fn demand(&self) -> impl Iterator<Item = (StopId, &ArrivalSpec)> + '_ {
        self.demand.iter().map(|d| (d.destination, &d.spec))
    }

    /// Generate every arrival of this run up to `horizon`.
    ///
    /// Each destination draws from its own RNG keyed by the
    /// `(origin, destination)` pair, so the timestamps do not depend on the
    /// order in which demand was attached.
    pub fn materialise(&mut self, horizon: SimTime, seed: u64, stop_count: usize) {
        self.horizon = horizon;
        let origin = self.id.index();
        for d in &mut self.demand {
            let key = StreamRng::pair_key(origin, d.destination.index(), stop_count);
            let mut rng = StreamRng::new(seed, key);
            d.stream = ArrivalStream::generate(&d.spec, horizon, &mut rng);
        }
    }

    /// Timestamps not yet turned into passengers.
    pub fn pending_arrivals(&self) -> usize {
        self.demand.iter().map(|d| d.stream.len()).sum()
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    /// Turn every pending timestamp strictly earlier than `time` into a
    /// waiting passenger.
    ///
    /// New passengers join the back of the queue in timestamp order; equal
    /// timestamps keep destination order.
    pub fn update(&mut self, time: SimTime) {
        let mut arrivals: Vec<(SimTime, StopId)> = Vec::new();
        for d in &mut self.demand {
            let dest = d.destination;
            arrivals.extend(d.stream.drain_before(time).map(|t| (t, dest)));
        }
        if arrivals.is_empty() {
            return;
        }
        // Stable: ties stay in destination order.
        arrivals.sort_by_key(|&(t, _)| t);

        self.generated += arrivals.len() as u64;
        let origin = self.id;
        self.queue.extend(
            arrivals
                .into_iter()
                .map(|(t, dest)| Passenger::new(origin, dest, t)),
        );
    }

    /// Append a passenger generated outside this stop's own streams.
    pub fn enqueue(&mut self, passenger: Passenger) {
        debug_assert_eq!(passenger.origin, self.id);
        self.generated += 1;
        self.queue.push_back(passenger);
    }

    /// One FIFO pass over the queue.
    ///
    /// `accept` sees each waiting passenger in order and may mark it as
    /// boarded (see [`Passenger::board`]).  Accepted passengers are removed
    /// and returned in the order they were accepted; the rest keep their
    /// relative order.  The waiting time of every accepted passenger is
    /// added to this stop's per-destination tally.
    pub fn admit<F>(&mut self, mut accept: F) -> Vec<Passenger>
    where
        F: FnMut(&mut Passenger) -> bool,
    {
        let mut boarded = Vec::new();
        let mut kept = VecDeque::with_capacity(self.queue.len());

        for mut p in self.queue.drain(..) {
            if accept(&mut p) {
                let tally = self.tallies.entry(p.destination).or_default();
                tally.waiting_sum += p.waiting_time.unwrap_or(0.0);
                tally.count += 1;
                boarded.push(p);
            } else {
                kept.push_back(p);
            }
        }
        self.queue = kept;
        boarded
    }

    #[inline]
    pub fn num_waiting(&self) -> usize {
        self.queue.len()
    }

    pub fn waiting(&self) -> impl Iterator<Item = &Passenger> + '_ {
        self.queue.iter()
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Integrate the current queue length over `[from, to)`.
    ///
    /// Any part already covered, or lying past the materialised horizon, is
    /// skipped, so overlapping calls never count the same interval twice.
    pub fn integrate(&mut self, from: SimTime, to: SimTime) {
        let from = from.max(self.integrated_to);
        let to = to.min(self.horizon);
        self.queue_length.accumulate(from, to, self.queue.len() as f64);
        self.integrated_to = self.integrated_to.max(to);
    }

    /// Integrate from the end of the last integration up to `time`.
    ///
    /// Called before a boarding pass that looks ahead of the current event,
    /// so passengers it pulls into the queue are only counted from then on.
    pub fn integrate_to(&mut self, time: SimTime) {
        self.integrate(self.integrated_to, time);
    }

    pub fn queue_length(&self) -> &TimeWeighted {
        &self.queue_length
    }

    pub fn tallies(&self) -> &BTreeMap<StopId, DestinationTally> {
        &self.tallies
    }

    /// Waiting time summed over every destination.
    pub fn waiting_total(&self) -> DestinationTally {
        self.tallies.values().fold(DestinationTally::default(), |acc, t| DestinationTally {
            waiting_sum: acc.waiting_sum + t.waiting_sum,
            count:       acc.count + t.count,
        })
    }

    /// Passengers created at this stop so far in the run.
    #[inline]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Drop every passenger, stream and statistic.  Demand is kept.
    pub fn reset(&mut self) {
        for d in &mut self.demand {
            d.stream.clear();
        }
        self.queue.clear();
        self.queue_length.reset();
        self.integrated_to = SimTime::ZERO;
        self.tallies.clear();
        self.generated = 0;
    }
}
