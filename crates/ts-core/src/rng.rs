//! Deterministic per-stream RNG.
//!
//! # Determinism strategy
//!
//! Every passenger-arrival stream (one per origin/destination pair) gets its
//! own independent `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (stream_key * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream keys uniformly across the seed space.
//! This means:
//!
//! - Streams never share RNG state, so adding a destination to one stop does
//!   not perturb the arrivals generated for any other pair.
//! - Two networks built with the same topology and seed produce bit-identical
//!   arrival timestamps regardless of which thread runs them.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-stream deterministic RNG.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run seed and a stream key.
    pub fn new(run_seed: u64, stream_key: u64) -> Self {
        let seed = run_seed ^ stream_key.wrapping_mul(MIXING_CONSTANT);
        StreamRng(SmallRng::seed_from_u64(seed))
    }

    /// Stable key for the `(origin, destination)` stream in a network of
    /// `stop_count` stops.
    #[inline]
    pub fn pair_key(origin: usize, destination: usize, stop_count: usize) -> u64 {
        (origin * stop_count + destination) as u64 + 1
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`, `dist.sample(rng.inner())`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
