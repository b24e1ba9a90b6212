use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt::Debug;

use rand::Rng;

use crate::error::NesError;
use crate::model::sampler::NoiseSampler;

/// Fitness function which maps a parameter vector to a scalar reward.
/// Higher is better.  Nothing is assumed about purity, determinism or
/// smoothness.
pub trait Objective: Sync {
    /// Error raised when a candidate cannot be evaluated
    type Error: StdError + Send + 'static;

    /// Evaluates the parameters, returning the reward
    fn eval(&self, params: &[f32]) -> Result<f32, Self::Error>;

    /// The known optimum, if any.  Only used when reporting progress.
    fn target(&self) -> Option<&[f32]> {
        None
    }
}

/// Wraps a plain closure as an infallible objective
pub struct FnObjective<F>(pub F);

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f32]) -> f32 + Sync,
{
    type Error = Infallible;

    fn eval(&self, params: &[f32]) -> Result<f32, Infallible> {
        Ok((self.0)(params))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Final state of a run
pub struct State {
    /// Parameters after the last update
    pub model: Vec<f32>,
    /// Objective value at `model`
    pub fitness: f32,
    /// Iterations whose update was skipped because the rewards were degenerate
    pub skipped_updates: usize,
}

impl State {
    /// Returns a new state
    pub fn new(model: Vec<f32>, fitness: f32, skipped_updates: usize) -> Self {
        State {
            model: model,
            fitness: fitness,
            skipped_updates: skipped_updates,
        }
    }
}

/// Trait to define optimizer methods
pub trait Optimizer: Debug {
    /// Runs the optimizer from `init`, drawing all noise from `sampler`.
    /// Settings are validated before anything is sampled; any objective
    /// failure aborts the run.
    fn run<O, R>(
        &self,
        init: Vec<f32>,
        objective: &O,
        sampler: &mut NoiseSampler<R>,
    ) -> Result<State, NesError<O::Error>>
    where
        O: Objective,
        R: Rng;
}
