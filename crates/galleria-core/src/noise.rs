//! Injectable noise sources.
//!
//! The integrator never touches global randomness: callers pass a
//! [`NoiseSource`] by mutable reference, so runs are reproducible from a seed
//! and tests can substitute a deterministic double.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard-normal samples for the stochastic field perturbation.
pub trait NoiseSource {
    /// Draw one sample from N(0, 1).
    fn sample(&mut self) -> f64;
}

/// Seedable Gaussian noise backed by [`StdRng`].
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Deterministic source from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Test double that injects no noise at all.
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}
