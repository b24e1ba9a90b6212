//! Population sampler.  Draws fresh standard normal noise for every
//! iteration from a caller-owned random source.
use rand::distributions::StandardNormal;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use super::{NoiseMatrix, WeightUpdater};

/// Samples noise vectors from N(0, 1)
pub struct NoiseSampler<R> {
    rng: R,
}

impl NoiseSampler<XorShiftRng> {
    /// Returns a sampler over a seeded XorShift generator
    pub fn seeded(seed: u64) -> Self {
        NoiseSampler::new(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseSampler<R> {
    /// Wraps an existing random source
    pub fn new(rng: R) -> Self {
        NoiseSampler { rng: rng }
    }

    #[inline]
    fn draw(&mut self) -> f32 {
        self.rng.sample::<f64, _>(StandardNormal) as f32
    }

    /// Draws a single vector of `dims` standard normal values
    pub fn sample_vec(&mut self, dims: usize) -> Vec<f32> {
        let mut v = vec![0f32; dims];
        v.update_gradients(&mut || self.draw());
        v
    }

    /// Draws a fresh `population × dims` matrix
    pub fn sample(&mut self, population: usize, dims: usize) -> NoiseMatrix {
        let mut noise = NoiseMatrix::zeros(population, dims);
        self.fill(&mut noise, false);
        noise
    }

    /// Overwrites every row of `noise`.  When `antithetic` is set, rows come
    /// in mirrored pairs (ε, -ε); the population must then be even.
    pub fn fill(&mut self, noise: &mut NoiseMatrix, antithetic: bool) {
        let dims = noise.dims();
        if antithetic {
            assert_eq!(noise.population() % 2, 0);
            for pair in noise.as_mut_slice().chunks_mut(dims * 2) {
                let (left, right) = pair.split_at_mut(dims);
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    *l = self.draw();
                    *r = -*l;
                }
            }
        } else {
            for n in noise.as_mut_slice().iter_mut() {
                *n = self.draw();
            }
        }
    }
}
