//! Deterministic random number generation
//!
//! Every landscape owns its own stream, seeded explicitly, so two landscapes
//! never observe each other's draws and tests can pin the terrain.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded terrain stream. Serializable so a saved landscape resumes the
/// exact sequence it would have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl TerrainRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for TerrainRng {
    fn default() -> Self {
        Self::new(7)
    }
}

impl RngCore for TerrainRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Helper functions for the two draws terrain generation needs
pub trait RngExt {
    /// Uniform sample in `[0, 1)`.
    fn unit_f64(&mut self) -> f64;
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: Rng> RngExt for R {
    fn unit_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }
}
