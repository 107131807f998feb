//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `statistics.csv`: `model,trial,statistic,hour,value` (empty `hour` for
//!   scalars)
//! - `events.csv`: `time,kind,vehicle,route,stop,onboard,waiting`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, StatRow};

/// Writes statistics and the event log to two CSV files.
pub struct CsvWriter {
    statistics: Writer<File>,
    events:     Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut statistics = Writer::from_path(dir.join("statistics.csv"))?;
        statistics.write_record(["model", "trial", "statistic", "hour", "value"])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["time", "kind", "vehicle", "route", "stop", "onboard", "waiting"])?;

        Ok(Self { statistics, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_statistics(&mut self, rows: &[StatRow]) -> OutputResult<()> {
        for row in rows {
            self.statistics.write_record(&[
                row.model.clone(),
                row.trial.to_string(),
                row.statistic.clone(),
                row.hour.map(|h| h.to_string()).unwrap_or_default(),
                row.value.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            format!("{:.3}", row.time),
            row.kind.to_owned(),
            row.vehicle.clone(),
            row.route.to_string(),
            row.stop.clone(),
            row.onboard.to_string(),
            row.waiting.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.statistics.flush()?;
        self.events.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
