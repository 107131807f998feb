//! The `Fleet`: every vehicle of one network, plus schedule bookkeeping.

use ts_core::{SimTime, VehicleId};
use ts_network::Route;

use crate::{RouteChangeRequest, Vehicle};

/// All vehicles, indexed by `VehicleId`.
///
/// Alongside each vehicle the fleet remembers the schedule window it last
/// saw, so schedule-driven route changes are requested once per window
/// crossing rather than on every event.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    windows:  Vec<u64>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vehicle`.  Its `id` must equal the current fleet size.
    pub fn push(&mut self, vehicle: Vehicle) {
        debug_assert_eq!(vehicle.id.index(), self.vehicles.len());
        self.vehicles.push(vehicle);
        self.windows.push(0);
    }

    /// Id the next pushed vehicle must carry.
    pub fn next_id(&self) -> VehicleId {
        VehicleId(self.vehicles.len() as u32)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> &Vehicle {
        &self.vehicles[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> &mut Vehicle {
        &mut self.vehicles[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn as_slice(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Integrate every vehicle's occupancy and standing over `[from, to)`.
    pub fn integrate(&mut self, from: SimTime, to: SimTime) {
        for v in &mut self.vehicles {
            v.integrate(from, to);
        }
    }

    /// Request schedule-driven route changes for every vehicle whose
    /// schedule window changed since the last call.
    ///
    /// A request is only issued when the prescribed route differs from the
    /// route the vehicle currently drives.  Returns the outcome of each
    /// request issued.
    pub fn apply_schedules(
        &mut self,
        time: SimTime,
        routes: &[Route],
    ) -> Vec<(VehicleId, RouteChangeRequest)> {
        let mut issued = Vec::new();
        for (v, last) in self.vehicles.iter_mut().zip(self.windows.iter_mut()) {
            let Some(schedule) = v.schedule() else { continue };
            let window = schedule.window(time);
            if window == *last {
                continue;
            }
            *last = window;
            let Some(target) = schedule.route_for_window(window) else { continue };
            if target != v.route() {
                issued.push((v.id, v.request_route_change(target, routes)));
            }
        }
        issued
    }

    /// Reset every vehicle and forget schedule windows.
    pub fn reset(&mut self) {
        for v in &mut self.vehicles {
            v.reset();
        }
        self.windows.fill(0);
    }
}
