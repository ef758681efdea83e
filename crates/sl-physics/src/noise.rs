//! Deterministic measurement noise.
//!
//! Noise is a pure function of a seed and the inputs it perturbs: the same
//! bench settings always produce the same reading, so tests can pin values
//! while different settings still scatter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededNoise {
    seed: u64,
}

impl SeededNoise {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample in `[lo, hi)` keyed by `inputs`.
    pub fn uniform(&self, inputs: &[f64], lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.mix(inputs));
        rng.gen_range(lo..hi)
    }

    fn mix(&self, inputs: &[f64]) -> u64 {
        inputs
            .iter()
            .fold(splitmix64(self.seed), |acc, v| {
                // normalise -0.0 so it keys the same stream as 0.0
                let bits = (v + 0.0).to_bits();
                splitmix64(acc ^ bits)
            })
    }
}

impl Default for SeededNoise {
    fn default() -> Self {
        Self::new(0x5eed)
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
