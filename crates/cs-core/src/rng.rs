//! Per-simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every simulation instance owns exactly one `SimRng`; nothing draws from a
//! process-wide generator.  A Monte-Carlo batch derives each trial's seed
//! from the batch seed:
//!
//!   seed = batch_seed XOR (trial * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive trial numbers uniformly across the seed space.
//! Trials never share RNG state, so they can run on any thread in any order
//! and still reproduce.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.  Owned by one simulation; never shared.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed deterministically.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Seed for trial `trial` of a batch seeded with `batch_seed`.
    #[inline]
    pub fn trial_seed(batch_seed: u64, trial: u64) -> u64 {
        batch_seed ^ trial.wrapping_mul(MIXING_CONSTANT)
    }

    /// Expose the inner `SmallRng` for use with distribution types
    /// (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
