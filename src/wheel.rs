//! Outcome generator.
//!
//! Every spin comes from a seedable ChaCha stream. A master seed fans out
//! into one independent stream per run index, so run `k` replays the same
//! way whether the run set is generated sequentially or in parallel.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::types::{Pocket, MAX_POCKET};

/// Anything that can produce roulette outcomes.
pub trait SpinSource {
    fn spin(&mut self) -> Pocket;

    /// Draw `n` outcomes eagerly.
    fn spins(&mut self, n: usize) -> Vec<Pocket> {
        (0..n).map(|_| self.spin()).collect()
    }
}

/// A fair single-zero wheel.
pub struct Wheel {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Wheel {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Wheel for one run of a run set. The derived seed never depends on
    /// how many other runs exist.
    pub fn for_run(master_seed: u64, run: usize) -> Self {
        let derived = master_seed ^ (run as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        debug!(master_seed, run, derived, "Derived run wheel");
        Self::seeded(derived)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SpinSource for Wheel {
    fn spin(&mut self) -> Pocket {
        self.rng.gen_range(0..=MAX_POCKET)
    }
}

/// Draw a fresh master seed from OS entropy.
pub fn entropy_seed() -> u64 {
    rand::thread_rng().gen()
}

/// Replays a fixed list of outcomes, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedWheel {
    outcomes: Vec<Pocket>,
    cursor: usize,
}

impl ScriptedWheel {
    /// Panics if `outcomes` is empty or holds a value above 36.
    pub fn new(outcomes: Vec<Pocket>) -> Self {
        assert!(!outcomes.is_empty(), "scripted wheel needs at least one outcome");
        assert!(outcomes.iter().all(|&p| p <= MAX_POCKET), "pocket out of range");
        Self { outcomes, cursor: 0 }
    }
}

impl SpinSource for ScriptedWheel {
    fn spin(&mut self) -> Pocket {
        let pocket = self.outcomes[self.cursor % self.outcomes.len()];
        self.cursor += 1;
        pocket
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
