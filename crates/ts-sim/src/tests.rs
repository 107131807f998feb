//! Integration tests for ts-sim.

use ts_core::{Capacity, Event, SimConfig, SimTime, StopId, VehicleId};
use ts_demand::ArrivalSpec;
use ts_fleet::Fleet;
use ts_network::{Topology, TopologyBuilder};

use crate::{Network, NetworkBuilder, SimObserver, VehicleSpec};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two stops 1 km apart on a single loop; `rate` passengers/hour from A to B.
fn shuttle(rate: f64) -> Topology {
    let mut b = TopologyBuilder::new();
    let a = b.add_stop("A").unwrap();
    let bb = b.add_stop("B").unwrap();
    b.add_demand(a, bb, ArrivalSpec::constant(rate)).unwrap();
    b.add_route(1, vec![a, bb, a], vec![1.0, 1.0]).unwrap();
    b.build()
}

/// ```text
/// route 1: A → B → C → A   (1 km hops)
/// route 2: A → B → A
/// ```
///
/// Route 1 can hand over to route 2 from every position, and back.
fn two_routes() -> Topology {
    let mut b = TopologyBuilder::new();
    let a = b.add_stop("A").unwrap();
    let bb = b.add_stop("B").unwrap();
    let c = b.add_stop("C").unwrap();
    for (o, d, rate) in [(a, bb, 40.0), (a, c, 25.0), (bb, c, 15.0), (c, a, 30.0), (bb, a, 20.0)] {
        b.add_demand(o, d, ArrivalSpec::table_with_interval(vec![rate, rate * 2.0, 0.0], 40.0))
            .unwrap();
    }
    b.add_route(1, vec![a, bb, c, a], vec![1.0, 1.0, 1.0]).unwrap();
    b.add_route(2, vec![a, bb, a], vec![1.0, 1.0]).unwrap();
    b.add_checkpoint(1, 2, 1, 0.0, 2).unwrap();
    b.add_checkpoint(1, 2, 2, 1.0, 1).unwrap();
    b.add_checkpoint(1, 2, 3, 0.0, 1).unwrap();
    b.add_checkpoint(2, 1, 1, 1.0, 1).unwrap();
    b.add_checkpoint(2, 1, 2, 0.0, 1).unwrap();
    b.build()
}

fn busy_network(seed: u64) -> Network {
    let config = SimConfig { seed, ..SimConfig::default() };
    NetworkBuilder::new(config, two_routes())
        .vehicle(VehicleSpec::new("red", 1).with_schedule_window(30.0, vec![1, 2, 1]))
        .vehicle(VehicleSpec::new("blue", 2).with_capacity(Capacity::new(4, 2)))
        .vehicle(VehicleSpec::new("green", 1).with_capacity(Capacity::new(2, 1)))
        .build()
        .unwrap()
}

/// Records invariants at every processed event.
#[derive(Default)]
struct Checker {
    times:        Vec<SimTime>,
    over_cap:     usize,
    distances:    Vec<f64>,
    backwards:    usize,
    max_occupied: usize,
    ended:        bool,
}

impl SimObserver for Checker {
    fn on_event(&mut self, event: &Event, _topology: &Topology, fleet: &Fleet) {
        self.times.push(event.time);
        if self.distances.is_empty() {
            self.distances = vec![0.0; fleet.len()];
        }
        for v in fleet.iter() {
            if v.occupancy() > v.capacity().max_cap() as usize {
                self.over_cap += 1;
            }
            self.max_occupied = self.max_occupied.max(v.occupancy());
            let last = &mut self.distances[v.id.index()];
            if v.distance() < *last {
                self.backwards += 1;
            }
            *last = v.distance();
        }
    }

    fn on_run_end(&mut self, _horizon: SimTime, _topology: &Topology, _fleet: &Fleet) {
        self.ended = true;
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use ts_core::{Event, SimTime, StopId, VehicleId};

    use crate::EventQueue;

    fn ev(t: f64, v: u32) -> Event {
        Event::departure(SimTime(t), VehicleId(v), StopId(0))
    }

    #[test]
    fn simultaneous_events_pop_in_insertion_order() {
        let mut q = EventQueue::new();
        q.push(ev(5.0, 0)); // A
        q.push(ev(5.0, 1)); // B
        assert_eq!(q.pop().map(|e| e.vehicle), Some(VehicleId(0)));
        assert_eq!(q.pop().map(|e| e.vehicle), Some(VehicleId(1)));
        assert!(q.pop().is_none());
    }

    #[test]
    fn earliest_first_then_fifo() {
        let mut q = EventQueue::new();
        q.push(ev(3.0, 0));
        q.push(ev(1.0, 1));
        q.push(ev(3.0, 2));
        q.push(ev(2.0, 3));
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek_time(), Some(SimTime(1.0)));
        let order: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|e| e.vehicle.0).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert!(q.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut q = EventQueue::new();
        q.push(ev(1.0, 0));
        q.clear();
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek_time(), None);
    }
}

// ── Builder & lifecycle errors ────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::{RunState, SimError};

    #[test]
    fn unknown_route_rejected() {
        let err = NetworkBuilder::new(SimConfig::default(), shuttle(1.0))
            .vehicle(VehicleSpec::new("bus", 7))
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::UnknownRoute { route: 7, .. }));
    }

    #[test]
    fn schedule_must_start_on_starting_route() {
        let err = NetworkBuilder::new(SimConfig::default(), two_routes())
            .vehicle(VehicleSpec::new("bus", 1).with_schedule(vec![2, 1]))
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Fleet(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { speed_kmh: 0.0, ..SimConfig::default() };
        let err = NetworkBuilder::new(config, shuttle(1.0)).build().unwrap_err();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn invalid_horizon_rejected() {
        let mut net = busy_network(1);
        assert!(matches!(net.run(SimTime(0.0), false), Err(SimError::Core(_))));
        assert!(matches!(net.run(SimTime(f64::NAN), false), Err(SimError::Core(_))));
        assert_eq!(net.state(), RunState::Fresh);
    }

    #[test]
    fn statistics_require_completed_run() {
        let net = busy_network(1);
        assert!(matches!(net.collect_statistics(), Err(SimError::NotCompleted)));
    }

    #[test]
    fn second_run_requires_reset() {
        let mut net = busy_network(1);
        net.run(SimTime(30.0), false).unwrap();
        assert_eq!(net.state(), RunState::Completed { horizon: SimTime(30.0) });
        assert!(matches!(net.run(SimTime(30.0), false), Err(SimError::NotReset)));
        net.reset();
        assert_eq!(net.state(), RunState::Fresh);
        net.run(SimTime(30.0), false).unwrap();
    }

    #[test]
    fn queue_holds_one_event_per_vehicle() {
        let mut net = busy_network(3);
        net.run(SimTime(45.0), false).unwrap();
        assert_eq!(net.queue_len(), net.fleet().len());
        net.reset();
        assert_eq!(net.queue_len(), 0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn passengers_are_conserved() {
        for seed in [1, 2, 3, 99] {
            let mut net = busy_network(seed);
            net.run(SimTime(120.0), false).unwrap();
            let counts = net.passenger_counts();
            assert!(counts.generated > 0);
            assert!(counts.is_conserved(), "seed {seed}: {counts:?}");
        }
    }

    #[test]
    fn capacity_never_exceeded() {
        let mut net = busy_network(5);
        let mut checker = Checker::default();
        net.run_with(SimTime(120.0), &mut checker).unwrap();
        assert_eq!(checker.over_cap, 0);
        assert!(checker.max_occupied > 0);
        assert!(checker.ended);
    }

    #[test]
    fn events_processed_in_time_order() {
        let mut net = busy_network(6);
        let mut checker = Checker::default();
        net.run_with(SimTime(120.0), &mut checker).unwrap();
        assert!(checker.times.windows(2).all(|w| w[0] <= w[1]));
        assert!(checker.times.iter().all(|&t| t <= SimTime(120.0)));
    }

    #[test]
    fn distance_monotonic_and_reset_to_zero() {
        let mut net = busy_network(7);
        let mut checker = Checker::default();
        net.run_with(SimTime(90.0), &mut checker).unwrap();
        assert_eq!(checker.backwards, 0);
        assert!(net.fleet().iter().all(|v| v.distance() > 0.0));

        net.reset();
        assert!(net.fleet().iter().all(|v| v.distance() == 0.0));
        assert_eq!(net.passenger_counts().generated, 0);
    }

    #[test]
    fn same_seed_same_statistics() {
        let mut a = busy_network(11);
        let mut b = busy_network(11);
        a.run(SimTime(150.0), false).unwrap();
        b.run(SimTime(150.0), true).unwrap();
        let first = a.collect_statistics().unwrap();
        assert_eq!(first, b.collect_statistics().unwrap());

        a.reset();
        a.run(SimTime(150.0), false).unwrap();
        assert_eq!(first, a.collect_statistics().unwrap());

        a.reseed(12);
        a.run(SimTime(150.0), false).unwrap();
        assert_ne!(first, a.collect_statistics().unwrap());
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn zero_demand_leaves_everything_empty() {
        let mut net = NetworkBuilder::new(SimConfig::default(), shuttle(0.0))
            .vehicle(VehicleSpec::new("bus", 1))
            .build()
            .unwrap();
        net.run(SimTime(60.0), false).unwrap();
        let stats = net.collect_statistics().unwrap();

        assert_eq!(stats.scalar("A avg people waiting"), Some(0.0));
        assert_eq!(stats.scalar("B avg people waiting"), Some(0.0));
        assert_eq!(stats.scalar("bus avg occupancy"), Some(0.0));
        assert_eq!(stats.series("bus hourly avg occupancy"), Some(&[0.0][..]));
        assert!(!stats.contains("A to B avg waiting time"));
        assert!(!stats.contains("A overall avg waiting time"));
        assert_eq!(stats.scalar("passengers generated"), Some(0.0));
    }

    #[test]
    fn single_seat_shuttle_boards_at_most_one_per_cycle() {
        // 60 km/h: each 1 km hop takes a minute, so a full cycle is 2 minutes.
        let config = SimConfig {
            speed_kmh:         60.0,
            min_dwell_minutes: 0.0,
            boarding_minutes:  0.0,
            capacity:          Capacity::new(1, 0),
            ..SimConfig::default()
        };
        let mut net = NetworkBuilder::new(config, shuttle(120.0))
            .vehicle(VehicleSpec::new("bus", 1))
            .build()
            .unwrap();
        let mut checker = Checker::default();
        net.run_with(SimTime(20.0), &mut checker).unwrap();

        let counts = net.passenger_counts();
        assert!(counts.is_conserved(), "{counts:?}");
        assert!(checker.max_occupied <= 1);

        let a = StopId(0);
        let b = StopId(1);
        let departures_from_a = net.paths()[&(a, b)].count;
        // Departures at 0, 2, …, 20.
        assert_eq!(departures_from_a, 11);
        assert!(counts.alighted + counts.onboard <= departures_from_a);
        assert_eq!(counts.generated, counts.alighted + counts.waiting + counts.onboard);
    }

    #[test]
    fn schedule_moves_vehicle_to_prescribed_route() {
        let mut net = busy_network(21);
        net.run(SimTime(50.0), false).unwrap();
        let red = net.fleet().get(VehicleId(0));
        let route2 = net.topology().route_by_number(2).unwrap();
        assert_eq!(red.route(), route2);
        assert!(red.pending().is_none());
    }

    #[test]
    fn staggered_start() {
        let mut net = busy_network(4);
        let mut checker = Checker::default();
        net.run_with(SimTime(10.0), &mut checker).unwrap();
        assert_eq!(&checker.times[..3], &[SimTime(0.0), SimTime(1.0), SimTime(2.0)]);
    }
}

// ── Statistics snapshot ───────────────────────────────────────────────────────

#[cfg(test)]
mod statistics {
    use super::*;
    use crate::StatValue;

    #[test]
    fn snapshot_has_every_family() {
        let mut net = busy_network(8);
        net.run(SimTime(90.0), false).unwrap();
        let stats = net.collect_statistics().unwrap();

        for name in ["red", "blue", "green"] {
            assert!(stats.scalar(&format!("{name} distance")).is_some());
            assert!(stats.scalar(&format!("{name} avg occupancy")).is_some());
            assert!(stats.scalar(&format!("{name} avg standing")).is_some());
            assert_eq!(stats.series(&format!("{name} hourly avg occupancy")).map(<[f64]>::len), Some(2));
            assert_eq!(stats.series(&format!("{name} hourly avg standing")).map(<[f64]>::len), Some(2));
        }
        for stop in ["A", "B", "C"] {
            assert!(stats.scalar(&format!("{stop} avg people waiting")).is_some());
            assert_eq!(stats.series(&format!("{stop} hourly avg people waiting")).map(<[f64]>::len), Some(2));
        }
        assert!(stats.scalar("A to B avg waiting time").is_some());
        assert!(stats.scalar("A overall avg waiting time").is_some());
        assert!(stats.scalar("A -> B avg occupancy").is_some());
        assert_eq!(stats.series("A -> B hourly avg occupancy").map(<[f64]>::len), Some(2));

        let total: f64 = net.fleet().iter().map(|v| v.distance()).sum();
        assert_eq!(stats.scalar("total distance"), Some(total));
    }

    #[test]
    fn hourly_buckets_average_back_to_overall() {
        let mut net = busy_network(9);
        net.run(SimTime(120.0), false).unwrap();
        let stats = net.collect_statistics().unwrap();
        let overall = stats.scalar("A avg people waiting").unwrap();
        let hourly = stats.series("A hourly avg people waiting").unwrap();
        let mean = hourly.iter().sum::<f64>() / hourly.len() as f64;
        assert!((overall - mean).abs() < 1e-9);
    }

    #[test]
    fn late_leaving_departures_stay_in_hourly_paths() {
        // Dwell past the horizon, plus a second departure exactly at it.
        let config = SimConfig {
            min_dwell_minutes: 70.0,
            stagger_minutes: 60.0,
            ..SimConfig::default()
        };
        let mut net = NetworkBuilder::new(config, shuttle(60.0))
            .vehicle(VehicleSpec::new("one", 1))
            .vehicle(VehicleSpec::new("two", 1))
            .build()
            .unwrap();
        net.run(SimTime(60.0), false).unwrap();

        let tally = net.paths().values().next().unwrap();
        assert_eq!(tally.count, 2);
        assert_eq!(tally.hourly_count, vec![2]);

        let stats = net.collect_statistics().unwrap();
        let overall = stats.scalar("A -> B avg occupancy").unwrap();
        let hourly = stats.series("A -> B hourly avg occupancy").unwrap();
        assert_eq!(hourly.len(), 1);
        assert!((overall - hourly[0]).abs() < 1e-9);
    }

    #[test]
    fn extra_pass_does_not_backdate_waiting() {
        // Nobody at A can board: C is on no route.
        let mut b = TopologyBuilder::new();
        let a = b.add_stop("A").unwrap();
        let bb = b.add_stop("B").unwrap();
        let c = b.add_stop("C").unwrap();
        b.add_demand(a, c, ArrivalSpec::constant(600.0)).unwrap();
        b.add_route(1, vec![a, bb, a], vec![1.0, 1.0]).unwrap();

        let config = SimConfig { min_dwell_minutes: 30.0, ..SimConfig::default() };
        let mut net = NetworkBuilder::new(config, b.build())
            .vehicle(VehicleSpec::new("bus", 1))
            .build()
            .unwrap();
        net.run(SimTime(60.0), false).unwrap();

        let stop = net.topology().stop(a);
        assert!(stop.num_waiting() > 0);
        // Each passenger can only be counted from its creation onwards.
        let ceiling: f64 = stop.waiting().map(|p| 60.0 - p.created_at.0).sum();
        let integral = stop.queue_length().integral();
        assert!(integral > 0.0);
        assert!(integral <= ceiling + 1e-9, "{integral} > {ceiling}");
    }

    #[test]
    fn values_are_scalar_or_series() {
        let mut net = busy_network(10);
        net.run(SimTime(30.0), false).unwrap();
        let stats = net.collect_statistics().unwrap();
        for (key, value) in stats.iter() {
            let hourly = key.contains("hourly");
            assert_eq!(matches!(value, StatValue::Series(_)), hourly, "{key}");
        }
    }
}
