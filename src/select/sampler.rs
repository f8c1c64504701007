//! Random draws for the sampler.
//!
//! Draws go through `RandomSource` so runs can be replayed from a seed and tests
//! can script exact picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::partition::Chunk;

/// Source of uniform integers.
pub trait RandomSource {
    /// Uniform integer in `0..upper`. `upper` is never zero.
    fn below(&mut self, upper: usize) -> usize;
}

/// `StdRng`-backed source; remembers its seed so a run can be reported and replayed.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed drawn from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn below(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Draw `picks` within-chunk positions with replacement and map each to an
/// absolute candidate index. `None` marks a draw that landed past the end of
/// the list; repeats are passed through untouched.
pub fn draw_chunk<'a, R: RandomSource + ?Sized>(
    rng: &'a mut R,
    chunk: Chunk,
    picks: usize,
    total: usize,
) -> impl Iterator<Item = Option<usize>> + 'a {
    (0..picks).map(move |_| {
        let pick = rng.below(chunk.size.get());
        chunk.resolve(pick, total)
    })
}
