//! ithaca: two buses on the Ithaca loops, compared with and without a
//! route schedule.
//!
//! One logged run writes every event to `output/ithaca/events.csv`; then each
//! model is repeated `TRIALS` times with seeds `SEED..SEED + TRIALS` and the
//! long-format statistics land in `output/ithaca/statistics.csv`, with a
//! cross-trial summary in `output/ithaca/summary.json`.
//!
//! Pass `--debug` to log every event at `DEBUG` level.

mod network;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, fmt};

use ts_core::{SimConfig, SimTime};
use ts_network::Topology;
use ts_output::{
    CsvWriter, EventLogObserver, Experiment, OutputWriter, Summary, TrialResult, summarise,
    summarise_families,
};
use ts_sim::{Network, NetworkBuilder, SimResult, VehicleSpec};

use network::build_topology;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const TRIALS:     u32 = 20;
const HOURS:      f64 = 18.0;
const OUTPUT_DIR: &str = "output/ithaca";

// ── Models ────────────────────────────────────────────────────────────────────

/// Both buses stay on their starting routes all day.
fn baseline(topology: &Topology) -> SimResult<Network> {
    NetworkBuilder::new(SimConfig { seed: SEED, ..SimConfig::default() }, topology.clone())
        .vehicle(VehicleSpec::new("Bus 1", 1))
        .vehicle(VehicleSpec::new("The Kenta Bus", 2))
        .build()
}

/// Three-hour windows: Bus 1 runs the express loop over midday while the
/// Kenta bus covers the long loop.
fn scheduled(topology: &Topology) -> SimResult<Network> {
    NetworkBuilder::new(SimConfig { seed: SEED, ..SimConfig::default() }, topology.clone())
        .vehicle(VehicleSpec::new("Bus 1", 1).with_schedule(vec![1, 1, 3, 3, 1, 1]))
        .vehicle(VehicleSpec::new("The Kenta Bus", 2).with_schedule(vec![2, 2, 1, 1, 2, 2]))
        .build()
}

// ── JSON summary ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ModelSummary {
    trials:     usize,
    families:   BTreeMap<&'static str, Summary>,
    statistics: BTreeMap<String, Summary>,
}

impl ModelSummary {
    fn new(results: &[TrialResult]) -> Self {
        Self {
            trials:     results.len(),
            families:   summarise_families(results)
                .into_iter()
                .map(|(family, summary)| (family.label(), summary))
                .collect(),
            statistics: summarise(results),
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let collector = tracing_subscriber::registry()
        .with(fmt::Layer::new().with_writer(io::stderr).with_filter(level));
    tracing::subscriber::set_global_default(collector)?;
    Ok(())
}

fn main() -> Result<()> {
    let debug = std::env::args().any(|a| a == "--debug");
    init_logging(debug)?;

    let horizon = SimTime::from_hours(HOURS);
    println!("=== ithaca: rust_ts transit simulator ===");
    println!("Horizon: {HOURS} h  |  Trials: {TRIALS}  |  Seed: {SEED}");
    println!();

    // 1. Network.
    let topology = build_topology()?;
    println!(
        "Topology: {} stops, {} routes, {} checkpoints",
        topology.stop_count(),
        topology.route_count(),
        topology.routes().iter().map(|r| r.checkpoints().count()).sum::<usize>(),
    );

    // 2. One logged run of the scheduled model.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = EventLogObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);
    let mut logged = scheduled(&topology)?;
    let t0 = Instant::now();
    logged.run_with(horizon, &mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    let counts = logged.passenger_counts();
    println!(
        "Logged run: {} events in {:.3} s, {} generated, {} delivered",
        obs.written(),
        t0.elapsed().as_secs_f64(),
        counts.generated,
        counts.alighted,
    );
    let mut writer = obs.into_writer();

    // 3. Repeated trials per model.
    let experiment = Experiment::new(horizon, TRIALS, SEED);
    let models: [(&str, fn(&Topology) -> SimResult<Network>); 2] =
        [("baseline", baseline), ("scheduled", scheduled)];

    let mut summaries = BTreeMap::new();
    for (name, model) in models {
        let t0 = Instant::now();
        let results = experiment.run(name, || model(&topology))?;
        info!(model = name, secs = t0.elapsed().as_secs_f64(), "model complete");
        experiment.write(&results, &mut writer)?;
        summaries.insert(name, ModelSummary::new(&results));
    }
    writer.finish()?;

    let file = BufWriter::new(File::create(Path::new(OUTPUT_DIR).join("summary.json"))?);
    serde_json::to_writer_pretty(file, &summaries)?;

    // 4. Headline comparison.
    println!();
    println!("{:<10} {:<18} {:>8} {:>8} {:>8} {:>8}", "Model", "Family", "Mean", "Std", "Min", "Max");
    println!("{}", "-".repeat(66));
    for (name, summary) in &summaries {
        for (family, s) in &summary.families {
            println!(
                "{:<10} {:<18} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
                name, family, s.mean, s.std_dev, s.min, s.max
            );
        }
    }
    println!();
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
