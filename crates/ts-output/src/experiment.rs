//! Repeated, independently seeded trials of one network model.
//!
//! Trial `i` runs with seed `base_seed + i`, so a single trial can be
//! replayed in isolation.  Each trial owns its `Network`; with the `parallel`
//! feature trials run on Rayon's pool and are returned in trial order.

use tracing::{debug, info};

use ts_core::SimTime;
use ts_sim::{Network, PassengerCounts, SimResult, Statistics};

use crate::row::StatRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Outcome of one trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    pub model:      String,
    pub trial:      u32,
    pub seed:       u64,
    pub statistics: Statistics,
    pub counts:     PassengerCounts,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Experiment {
    pub horizon:   SimTime,
    pub trials:    u32,
    pub base_seed: u64,
}

impl Experiment {
    pub fn new(horizon: SimTime, trials: u32, base_seed: u64) -> Self {
        Self { horizon, trials, base_seed }
    }

    pub fn seed_for(&self, trial: u32) -> u64 {
        self.base_seed.wrapping_add(u64::from(trial))
    }

    /// Run every trial of `model`.
    ///
    /// `factory` builds a fresh network per trial; its configured seed is
    /// replaced by [`seed_for`][Self::seed_for].  The first failing trial
    /// aborts the experiment.
    #[cfg(not(feature = "parallel"))]
    pub fn run<F>(&self, model: &str, factory: F) -> OutputResult<Vec<TrialResult>>
    where
        F: Fn() -> SimResult<Network>,
    {
        info!(model, trials = self.trials, horizon = %self.horizon, "experiment start");
        (0..self.trials).map(|trial| self.run_trial(model, trial, &factory)).collect()
    }

    /// Run every trial of `model` on Rayon's thread pool.
    ///
    /// Results are in trial order.  The first failing trial aborts the
    /// experiment.
    #[cfg(feature = "parallel")]
    pub fn run<F>(&self, model: &str, factory: F) -> OutputResult<Vec<TrialResult>>
    where
        F: Fn() -> SimResult<Network> + Sync,
    {
        use rayon::prelude::*;

        info!(model, trials = self.trials, horizon = %self.horizon, "experiment start");
        (0..self.trials)
            .into_par_iter()
            .map(|trial| self.run_trial(model, trial, &factory))
            .collect()
    }

    /// Flatten `results` into long-format rows and hand them to `writer`.
    pub fn write<W: OutputWriter>(&self, results: &[TrialResult], writer: &mut W) -> OutputResult<()> {
        for result in results {
            let rows = StatRow::from_statistics(&result.model, result.trial, &result.statistics);
            writer.write_statistics(&rows)?;
        }
        Ok(())
    }

    fn run_trial<F>(&self, model: &str, trial: u32, factory: &F) -> OutputResult<TrialResult>
    where
        F: Fn() -> SimResult<Network>,
    {
        let seed = self.seed_for(trial);
        let wrap = |source| OutputError::Trial { trial, source };

        let mut network = factory().map_err(wrap)?;
        network.reseed(seed);
        network.run(self.horizon, false).map_err(wrap)?;
        let statistics = network.collect_statistics().map_err(wrap)?;
        let counts = network.passenger_counts();

        debug!(model, trial, seed, generated = counts.generated, "trial complete");
        Ok(TrialResult { model: model.to_owned(), trial, seed, statistics, counts })
    }
}
