//! `EventQueue`: pending vehicle events ordered by time.
//!
//! Events are bucketed by their exact timestamp in a `BTreeMap`; each bucket
//! is a FIFO.  Popping takes the front of the earliest bucket, so events
//! scheduled for the same instant fire in the order they were pushed and no
//! other comparator is ever consulted.
//!
//! The queue holds one pending event per vehicle at all times during a run,
//! so W (distinct timestamps) is at most the fleet size and every operation
//! is O(log fleet).

use std::collections::{BTreeMap, VecDeque};

use ts_core::{Event, SimTime};

#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest event; ties in insertion order.
    pub fn pop(&mut self) -> Option<Event> {
        let mut bucket = self.inner.first_entry()?;
        let event = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
