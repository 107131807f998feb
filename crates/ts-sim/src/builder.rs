//! Fluent builder for constructing a [`Network`].

use ts_core::{Capacity, RouteId, SimConfig};
use ts_fleet::{Fleet, RouteSchedule, Vehicle};
use ts_network::Topology;

use crate::{Network, SimError, SimResult};

/// A vehicle to be added to the fleet, with routes given by number.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub name:     String,
    /// Number of the route the vehicle starts on.
    pub route:    u32,
    /// Overrides `SimConfig::capacity` when set.
    pub capacity: Option<Capacity>,
    pub schedule: Option<ScheduleSpec>,
}

/// Route numbers, one per window.  The first entry must be the starting
/// route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSpec {
    /// Overrides `SimConfig::schedule_window_minutes` when set.
    pub window_minutes: Option<f64>,
    pub routes:         Vec<u32>,
}

impl VehicleSpec {
    pub fn new(name: impl Into<String>, route: u32) -> Self {
        Self { name: name.into(), route, capacity: None, schedule: None }
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Follow `routes` using the configured default window.
    pub fn with_schedule(mut self, routes: Vec<u32>) -> Self {
        self.schedule = Some(ScheduleSpec { window_minutes: None, routes });
        self
    }

    pub fn with_schedule_window(mut self, window_minutes: f64, routes: Vec<u32>) -> Self {
        self.schedule = Some(ScheduleSpec { window_minutes: Some(window_minutes), routes });
        self
    }
}

/// Fluent builder for [`Network`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, capacity, speed, dwell, …
/// - [`Topology`]: from [`ts_network::TopologyBuilder`]
///
/// # Example
///
/// ```rust,ignore
/// let mut network = NetworkBuilder::new(config, topology)
///     .vehicle(VehicleSpec::new("Bus 1", 1).with_schedule(vec![1, 3, 1]))
///     .vehicle(VehicleSpec::new("Bus 2", 2))
///     .build()?;
/// network.run(SimTime::from_hours(18.0), false)?;
/// let stats = network.collect_statistics()?;
/// ```
pub struct NetworkBuilder {
    config:   SimConfig,
    topology: Topology,
    vehicles: Vec<VehicleSpec>,
}

impl NetworkBuilder {
    pub fn new(config: SimConfig, topology: Topology) -> Self {
        Self { config, topology, vehicles: Vec::new() }
    }

    pub fn vehicle(mut self, spec: VehicleSpec) -> Self {
        self.vehicles.push(spec);
        self
    }

    pub fn vehicles(mut self, specs: impl IntoIterator<Item = VehicleSpec>) -> Self {
        self.vehicles.extend(specs);
        self
    }

    /// Validate the configuration, resolve route numbers, and return a
    /// ready-to-run [`Network`].
    pub fn build(self) -> SimResult<Network> {
        self.config.validate()?;

        let mut fleet = Fleet::new();
        for spec in &self.vehicles {
            let route = resolve(&self.topology, &spec.name, spec.route)?;
            let schedule = match &spec.schedule {
                None => None,
                Some(s) => {
                    let routes = s
                        .routes
                        .iter()
                        .map(|&n| resolve(&self.topology, &spec.name, n))
                        .collect::<SimResult<Vec<_>>>()?;
                    let window = s.window_minutes.unwrap_or(self.config.schedule_window_minutes);
                    Some(RouteSchedule::new(window, routes))
                }
            };
            let capacity = spec.capacity.unwrap_or(self.config.capacity);
            let id = fleet.next_id();
            fleet.push(Vehicle::new(id, spec.name.clone(), route, capacity, schedule)?);
        }

        Ok(Network::new(self.config, self.topology, fleet))
    }
}

fn resolve(topology: &Topology, vehicle: &str, number: u32) -> SimResult<RouteId> {
    topology
        .route_by_number(number)
        .ok_or_else(|| SimError::UnknownRoute { vehicle: vehicle.to_owned(), route: number })
}
