/// Draws Gaussian noise for each population
pub mod sampler;

use std::slice::Chunks;

use rayon::prelude::*;

/// Updates a given vector's weights in place
pub trait WeightUpdater {
    /// Number of weights held
    fn num_weights(&self) -> usize;

    /// Overwrites every weight with successive values from `f`
    fn update_gradients<F>(&mut self, f: &mut F)
    where
        F: FnMut() -> f32;

    /// Multiplies every weight by `f`
    fn scale_gradients(&mut self, f: f32);

    /// Copies these weights into `other`
    fn copy_gradients(&self, other: &mut Self);

    /// Adds `other` to these weights, element-wise
    fn add_gradients(&mut self, other: &Self);
}

impl WeightUpdater for Vec<f32> {
    #[inline]
    fn num_weights(&self) -> usize {
        self.len()
    }

    #[inline]
    fn update_gradients<F>(&mut self, f: &mut F)
    where
        F: FnMut() -> f32,
    {
        for w in self.iter_mut() {
            *w = f();
        }
    }

    #[inline]
    fn scale_gradients(&mut self, f: f32) {
        for w in self.iter_mut() {
            *w *= f;
        }
    }

    fn copy_gradients(&self, other: &mut Self) {
        assert_eq!(self.len(), other.len());
        other.copy_from_slice(self);
    }

    fn add_gradients(&mut self, other: &Self) {
        assert_eq!(self.len(), other.len());
        for (w, o) in self.iter_mut().zip(other.iter()) {
            *w += o;
        }
    }
}

/// Writes `base + sigma * noise` into `out`
#[inline]
pub fn perturb(base: &[f32], noise: &[f32], sigma: f32, out: &mut [f32]) {
    assert_eq!(base.len(), noise.len());
    assert_eq!(base.len(), out.len());
    for ((o, b), n) in out.iter_mut().zip(base).zip(noise) {
        *o = b + sigma * n;
    }
}

/// Row-major `population × dims` matrix of noise vectors.  The shape is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseMatrix {
    population: usize,
    dims: usize,
    data: Vec<f32>,
}

impl NoiseMatrix {
    /// Returns a matrix of zeros.  Panics if either dimension is zero.
    pub fn zeros(population: usize, dims: usize) -> Self {
        assert!(population > 0, "noise matrix needs at least one row");
        assert!(dims > 0, "noise matrix needs at least one column");
        NoiseMatrix {
            population: population,
            dims: dims,
            data: vec![0f32; population * dims],
        }
    }

    /// Number of rows
    pub fn population(&self) -> usize {
        self.population
    }

    /// Length of each row
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Returns row `i`
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    /// Iterates over the rows in order
    pub fn rows(&self) -> Chunks<'_, f32> {
        self.data.chunks(self.dims)
    }

    /// Parallel iterator over the rows, in order
    pub fn par_rows(&self) -> rayon::slice::Chunks<'_, f32> {
        self.data.par_chunks(self.dims)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Computes `Σ weights[j] * row(j)`
    pub fn weighted_sum(&self, weights: &[f32]) -> Vec<f32> {
        assert_eq!(weights.len(), self.population);
        let mut out = vec![0f32; self.dims];
        for (row, w) in self.rows().zip(weights) {
            for (o, n) in out.iter_mut().zip(row) {
                *o += w * n;
            }
        }
        out
    }
}
