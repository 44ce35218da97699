//! Deterministic random number generation for bagging.

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Source of uniformly distributed sample indices.
///
/// Bootstrap sampling only needs one operation: a uniform integer in
/// `[0, bound)`. Identical starting state and identical call sequence must
/// yield identical output, which is what makes bagging reproducible.
pub trait BootstrapRng {
    /// Uniformly distributed integer in `[0, bound)`. `bound` is at least 1.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: BootstrapRng + ?Sized> BootstrapRng for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// A wrapper for the deterministic bagging generator.
///
/// Cloning snapshots the full generator state, so a clone replays exactly
/// the sequence the original would have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    seed: u64,
    state: Xoshiro256PlusPlus,
}

impl Random {
    /// Constructor, with random seed
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Constructor, with specific seed
    pub fn with_seed(seed: u64) -> Self {
        Random {
            seed,
            state: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the state right after construction.
    pub fn reset(&mut self) {
        self.state = Xoshiro256PlusPlus::seed_from_u64(self.seed);
    }

    /// Generate random float data in [0.0, 1.0)
    pub fn next_float(&mut self) -> f32 {
        self.state.gen()
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapRng for Random {
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound >= 1);
        self.state.gen_range(0..bound)
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        self.state.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.state.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.state.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.state.try_fill_bytes(dest)
    }
}
