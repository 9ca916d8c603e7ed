//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! All randomness in the simulator — traffic resampling, Poisson emergency
//! counts, district draws, in-polygon rejection sampling — flows through one
//! explicitly owned [`SimRng`] held by the engine and passed down by mutable
//! reference.  There is no global or thread-local source, so:
//!
//! - Reseeding is an explicit operation (`seed`), never tied to wall-clock.
//! - Two runs with the same seed and action sequence produce identical
//!   observations and rewards.
//! - Components consume draws in a fixed call order; adding a draw changes
//!   downstream results, which is the expected cost of a single stream.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// The simulator's owned, seedable random source.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Replace the internal state deterministically from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = SmallRng::seed_from_u64(seed);
    }

    /// Expose the inner `SmallRng` for use with `rand`/`rand_distr`
    /// distribution types (`dist.sample(rng.inner())`, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        use rand::Rng;
        self.0.gen_range(range)
    }
}
