//! Fixed loop itineraries and their route-switch checkpoints.

use std::collections::BTreeMap;

use ts_core::{RouteId, StopId};

/// Where a vehicle may leave this route for another one.
///
/// A vehicle whose next stop index on this route equals the checkpoint key
/// switches once it has covered exactly `threshold` km measured from that
/// stop, and continues on the target route towards `resume_index`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub threshold:    f64,
    pub resume_index: usize,
}

/// A closed loop of stops: `stops[0] == stops[len - 1]`.
///
/// `distances[i]` is the hop from `stops[i]` to `stops[i + 1]`, in km.
/// Do not construct directly; use [`TopologyBuilder::add_route`].
///
/// [`TopologyBuilder::add_route`]: crate::TopologyBuilder::add_route
#[derive(Clone, Debug)]
pub struct Route {
    pub id:     RouteId,
    /// User-facing route number.
    pub number: u32,

    pub(crate) stops:       Vec<StopId>,
    pub(crate) distances:   Vec<f64>,
    /// Keyed by `(target route number, next stop index on this route)`.
    pub(crate) checkpoints: BTreeMap<(u32, usize), Checkpoint>,
}

impl Route {
    #[inline]
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of entries in the stop list, counting the repeated first stop.
    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn stop_at(&self, index: usize) -> StopId {
        self.stops[index]
    }

    /// Distance of the hop ending at `stops[next_index]`.
    #[inline]
    pub fn hop_to(&self, next_index: usize) -> f64 {
        self.distances[next_index - 1]
    }

    /// Next-stop index after arriving at `stops[next_index]`.
    ///
    /// Index 0 is never produced: the loop wraps from the last entry to 1.
    #[inline]
    pub fn advance(&self, next_index: usize) -> usize {
        next_index % (self.stops.len() - 1) + 1
    }

    pub fn contains(&self, stop: StopId) -> bool {
        self.stops.contains(&stop)
    }

    /// Length of one full lap, in km.
    pub fn loop_length(&self) -> f64 {
        self.distances.iter().sum()
    }

    pub fn checkpoint(&self, target_number: u32, next_index: usize) -> Option<Checkpoint> {
        self.checkpoints.get(&(target_number, next_index)).copied()
    }

    pub fn checkpoints(&self) -> impl Iterator<Item = (u32, usize, Checkpoint)> + '_ {
        self.checkpoints.iter().map(|(&(target, idx), &cp)| (target, idx, cp))
    }
}
