//! The Ithaca network: six stops, three loops, and their hand-over points.
//!
//! ```text
//! Route 1  TDOG → WegE → ComE → Ctown → ComW → WegW → TDOG
//! Route 2              ComE → Ctown → ComW → ComE
//! Route 3  TDOG → WegE → ComE ─────────→ ComW → WegW → TDOG
//! ```

use std::io::Cursor;

use anyhow::Result;

use ts_core::StopId;
use ts_demand::load_rates_reader;
use ts_network::{Topology, TopologyBuilder};

/// Length of one rate interval: morning, midday, evening.
const RATE_INTERVAL_MINUTES: f64 = 360.0;

const RATES_CSV: &str = "\
origin,destination,interval,rate_per_hour
Wegmans-Eastbound,Commons-Eastbound,0,12
Wegmans-Eastbound,Commons-Eastbound,1,8
Wegmans-Eastbound,Commons-Eastbound,2,14
Wegmans-Eastbound,Collegetown,0,15
Wegmans-Eastbound,Collegetown,1,6
Wegmans-Eastbound,Collegetown,2,10
Commons-Eastbound,Collegetown,0,12
Commons-Eastbound,Collegetown,1,12
Commons-Eastbound,Collegetown,2,12
Collegetown,Commons-Westbound,0,6
Collegetown,Commons-Westbound,1,12
Collegetown,Commons-Westbound,2,18
Collegetown,Wegmans-Westbound,0,4
Collegetown,Wegmans-Westbound,1,10
Collegetown,Wegmans-Westbound,2,16
Commons-Westbound,Wegmans-Westbound,0,12
Commons-Westbound,Wegmans-Westbound,1,8
Commons-Westbound,Wegmans-Westbound,2,12
";

/// A route as laid out here, kept to derive checkpoints.
struct Line {
    number: u32,
    stops:  Vec<StopId>,
    hops:   Vec<f64>,
}

impl Line {
    /// First position of `stop` on the loop, ignoring the closing repeat.
    fn position(&self, stop: StopId) -> Option<usize> {
        self.stops[..self.stops.len() - 1].iter().position(|&s| s == stop)
    }
}

pub fn build_topology() -> Result<Topology> {
    let mut b = TopologyBuilder::new();

    let tdog  = b.add_stop("TDOG Depot")?;
    let weg_e = b.add_stop("Wegmans-Eastbound")?;
    let weg_w = b.add_stop("Wegmans-Westbound")?;
    let com_e = b.add_stop("Commons-Eastbound")?;
    let com_w = b.add_stop("Commons-Westbound")?;
    let ctown = b.add_stop("Collegetown")?;

    let rates = load_rates_reader(Cursor::new(RATES_CSV), RATE_INTERVAL_MINUTES)?;
    b.add_rates(&rates)?;

    let lines = [
        Line {
            number: 1,
            stops:  vec![tdog, weg_e, com_e, ctown, com_w, weg_w, tdog],
            hops:   vec![0.5, 2.0, 2.0, 2.0, 2.0, 0.5],
        },
        Line {
            number: 2,
            stops:  vec![com_e, ctown, com_w, com_e],
            hops:   vec![2.0, 2.0, 0.3],
        },
        Line {
            number: 3,
            stops:  vec![tdog, weg_e, com_e, com_w, weg_w, tdog],
            hops:   vec![0.5, 2.0, 2.0, 2.0, 0.5],
        },
    ];

    for line in &lines {
        b.add_route(line.number, line.stops.clone(), line.hops.clone())?;
    }
    for from in &lines {
        for to in lines.iter().filter(|l| l.number != from.number) {
            connect(&mut b, from, to)?;
        }
    }

    Ok(b.build())
}

/// Register a checkpoint for every next-stop index of `from`.
///
/// A vehicle heading for `from.stops[k]` keeps driving `from` until the first
/// stop that `to` also serves, then continues on `to` from that stop.
fn connect(b: &mut TopologyBuilder, from: &Line, to: &Line) -> Result<()> {
    let loop_len = from.stops.len() - 1;
    for next_index in 1..from.stops.len() {
        let mut pos = next_index;
        let mut threshold = 0.0;
        let mut shared = to.position(from.stops[pos]);
        for _ in 0..loop_len {
            if shared.is_some() {
                break;
            }
            pos = pos % loop_len + 1;
            threshold += from.hops[pos - 1];
            shared = to.position(from.stops[pos]);
        }
        if let Some(at) = shared {
            b.add_checkpoint(from.number, to.number, next_index, threshold, at + 1)?;
        }
    }
    Ok(())
}
