//! Random draws for shuffle mode
//!
//! Shuffle picks the next episode with a uniform draw over the whole
//! playlist. The source is injectable so runs can be reproduced.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Source of uniform playlist indices
pub trait RandomSource {
    /// Uniform index in `0..upper`
    ///
    /// Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Thread-local RNG, for normal use
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }
}

/// Seeded RNG; the same seed yields the same sequence of draws
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Pick the source matching a configured seed
pub(crate) fn from_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
