//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, StatRow};

/// Trait implemented by output backends.
///
/// Writes made through [`EventLogObserver`][crate::EventLogObserver] cannot
/// fail the run; their errors are stored and retrieved with
/// [`take_error`][crate::EventLogObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of statistic observations.
    fn write_statistics(&mut self, rows: &[StatRow]) -> OutputResult<()>;

    /// Write one processed event.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush buffered rows without closing.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
