use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};

/// Supplies a fresh random generator per request.
///
/// Reference ids and celebration decorations draw from this seam so tests
/// and demos can pin their output with a seed.
pub trait EntropySource: Send + Sync {
    type Rng: RngCore;

    fn rng(&self) -> Self::Rng;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    type Rng = ThreadRng;

    fn rng(&self) -> ThreadRng {
        rand::thread_rng()
    }
}

/// Every request replays the same sequence from `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededEntropy {
    seed: u64,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl EntropySource for SeededEntropy {
    type Rng = StdRng;

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
