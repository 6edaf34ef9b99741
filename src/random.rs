use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for rollouts.
///
/// The generator is owned by the engine that uses it and threaded explicitly through every
/// simulation, so a seeded generator makes a whole search reproducible.
pub trait RandomGenerator: Default {
    /// Returns a uniformly distributed index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

/// Draws from the thread-local generator. Not reproducible between runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// A deterministic generator backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: ChaCha8Rng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}
