// src/rng.rs
//! Random Number Generation for CTMC Simulation
//!
//! # Design Philosophy
//!
//! Trajectory sampling requires random numbers with specific properties:
//! 1. **Reproducibility**: Same seed → same trajectory (critical for debugging/validation)
//! 2. **Parallel safety**: Independent sampling runs must have independent streams
//! 3. **Statistical quality**: Exponential holding times must be unbiased
//!
//! Each sampling run owns its own `StdRng` seeded from a base seed plus a run
//! identifier, so runs can execute in parallel without any shared mutable
//! generator state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp1};

/// RNG factory for reproducible parallel sampling runs
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create an independent RNG stream for a specific run
    pub fn create_std_rng(&self, run_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(run_id))
    }
}

/// Seed a standard RNG directly
pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw from an exponential distribution with the given rate
///
/// Samples a standard exponential and rescales by `1/rate`, avoiding the
/// fallible `Exp::new` constructor. The caller must pass `rate > 0`.
pub fn get_exponential_draw<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    let standard: f64 = Exp1.sample(rng);
    standard / rate
}
