//! `EventLogObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ts_core::{Event, EventKind, SimTime};
use ts_fleet::Fleet;
use ts_network::Topology;
use ts_sim::SimObserver;

use crate::row::EventRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes one [`EventRow`] per processed event to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `network.run_with()` returns, check for
/// errors with [`take_error`][Self::take_error].  The writer is flushed, not
/// finished, at the end of the run so statistics can still be appended.
pub struct EventLogObserver<W: OutputWriter> {
    writer:     W,
    written:    u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of event rows written.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer (e.g. to write statistics after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for EventLogObserver<W> {
    fn on_event(&mut self, event: &Event, topology: &Topology, fleet: &Fleet) {
        let vehicle = fleet.get(event.vehicle);
        let stop = topology.stop(event.stop);
        let row = EventRow {
            time:    event.time.minutes(),
            kind:    match event.kind {
                EventKind::Departure => "departure",
                EventKind::Arrival => "arrival",
            },
            vehicle: vehicle.name.clone(),
            route:   topology.route(vehicle.route()).number,
            stop:    stop.name.clone(),
            onboard: vehicle.occupancy() as u32,
            waiting: stop.num_waiting() as u32,
        };
        let result = self.writer.write_event(&row);
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, _horizon: SimTime, _topology: &Topology, _fleet: &Fleet) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
