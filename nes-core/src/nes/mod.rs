//! Optimizer for Natural Evolutionary Strategies
//!
//! Each pass samples a population of noise vectors, evaluates the objective at
//! `w + σ·N[j]`, standardizes the rewards and moves `w` by
//! `α / (n·σ) · Σ A[j]·N[j]`.

use std::time::SystemTime;

use float_ord::FloatOrd;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{ConfigError, Degenerate, NesError};
use crate::model::sampler::NoiseSampler;
use crate::model::{perturb, NoiseMatrix, WeightUpdater};
use crate::optimizer::*;

// Contains the momentum vector
struct Momentum {
    gradient: Vec<f32>,
    mu: f32,
}

impl Momentum {
    fn update(&mut self, new_gradient: &mut Vec<f32>) {
        self.gradient.scale_gradients(self.mu);
        self.gradient.add_gradients(new_gradient);
        self.gradient.copy_gradients(new_gradient);
    }
}

/// What to do when an iteration's rewards cannot be standardized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Leave the parameters unchanged for that iteration
    Skip,
    /// Abort the run with [`NesError::DegenerateRewards`]
    Fail,
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        DegeneratePolicy::Skip
    }
}

/// Settings for Natural ES
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Natural {
    /// Number of perturbed candidates evaluated per iteration
    pub population: usize,

    /// Standard deviation of the search distribution
    pub sigma: f32,

    /// Learning rate
    pub alpha: f32,

    /// Number of steps to take before exiting the optimizer
    pub iterations: usize,

    /// Number of iterations between reporting progress
    pub report_iter: usize,

    /// When provided, accumulates updates with this decay
    pub momentum: Option<f32>,

    /// When set, replaces the standardized rewards with rank-based utilities.
    pub shape: bool,

    /// When set, samples noise in mirrored pairs (ε, -ε)
    pub antithetic: bool,

    /// Evaluates the population on the rayon thread pool
    pub parallel: bool,

    /// Handling of all-equal or non-finite rewards
    pub degenerate: DegeneratePolicy,
}

impl Default for Natural {
    fn default() -> Self {
        Natural {
            population: 50,
            sigma: 0.1,
            alpha: 0.001,
            iterations: 300,
            report_iter: 20,
            momentum: None,
            shape: false,
            antithetic: false,
            parallel: false,
            degenerate: DegeneratePolicy::Skip,
        }
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            name: name,
            value: value,
        })
    }
}

impl Natural {
    /// Checks the settings without touching any objective or sampler
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        check_positive("sigma", self.sigma)?;
        check_positive("alpha", self.alpha)?;
        if self.report_iter == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        if self.antithetic && self.population % 2 != 0 {
            return Err(ConfigError::OddAntitheticPopulation(self.population));
        }
        match self.momentum {
            Some(mu) if !(mu >= 0. && mu < 1.) => Err(ConfigError::Momentum(mu)),
            _ => Ok(()),
        }
    }

    // Scale applied to the weighted noise sum
    fn step_size(&self) -> f32 {
        self.alpha / (self.population as f32 * self.sigma)
    }

    // Fills `rewards[j]` with the objective at `parent + sigma * noise[j]`
    fn evaluate<O: Objective>(
        &self,
        objective: &O,
        parent: &[f32],
        noise: &NoiseMatrix,
        rewards: &mut [f32],
    ) -> Result<(), O::Error> {
        let sigma = self.sigma;
        let candidate = |row: &[f32]| {
            let mut w_try = vec![0f32; parent.len()];
            perturb(parent, row, sigma, &mut w_try);
            objective.eval(&w_try)
        };

        if self.parallel {
            rewards
                .par_iter_mut()
                .zip(noise.par_rows())
                .try_for_each(|(r, row)| -> Result<(), O::Error> {
                    *r = candidate(row)?;
                    Ok(())
                })
        } else {
            for (r, row) in rewards.iter_mut().zip(noise.rows()) {
                *r = candidate(row)?;
            }
            Ok(())
        }
    }
}

/// Z-normalizes `scores` in place using the population standard deviation.
/// On error the scores are left untouched.
pub fn standardize(scores: &mut [f32]) -> Result<(), Degenerate> {
    let n_scores = scores.len() as f32;
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(Degenerate::NonFinite);
    }

    let mu = scores.iter().sum::<f32>() / n_scores;
    let var: f32 = scores.iter().map(|v| (v - mu).powi(2)).sum::<f32>() / n_scores;
    let std = var.sqrt();

    if !mu.is_finite() || !std.is_finite() {
        return Err(Degenerate::NonFinite);
    }
    if std == 0. {
        return Err(Degenerate::ZeroVariance);
    }

    for s in scores.iter_mut() {
        *s = (*s - mu) / std;
    }
    Ok(())
}

/// Reweights the scores based on rank-based fitness shaping
pub fn fitness_shape(scores: &mut [f32]) {
    let mut i_scores: Vec<_> = scores.iter().cloned().enumerate().collect();
    i_scores.sort_by_key(|(_i, x)| FloatOrd(-*x));

    let len = scores.len();
    let log_len = (len as f32 / 2. + 1.).ln();
    let mut sum = 0.;
    for (mut rank, (i, _s)) in i_scores.into_iter().enumerate() {
        rank += 1;
        let nom = (0f32).max(log_len - (rank as f32).ln());
        scores[i] = nom;
        sum += nom;
    }
    for s in scores.iter_mut() {
        *s = *s / sum - 1. / len as f32;
    }
}

fn report(now: &SystemTime, pass: usize, model: &[f32], fitness: f32, target: Option<&[f32]>) {
    let (s, m) = now
        .elapsed()
        .map(|e| (e.as_secs(), e.subsec_millis()))
        .unwrap_or((0, 0));
    match target {
        Some(t) => println!(
            "Time: {}.{:03},\tIteration: {},\tFitness: {},\tParams: {:?},\tTarget: {:?}",
            s, m, pass, fitness, model, t
        ),
        None => println!(
            "Time: {}.{:03},\tIteration: {},\tFitness: {},\tParams: {:?}",
            s, m, pass, fitness, model
        ),
    }
}

impl Optimizer for Natural {
    fn run<O, R>(
        &self,
        init: Vec<f32>,
        objective: &O,
        sampler: &mut NoiseSampler<R>,
    ) -> Result<State, NesError<O::Error>>
    where
        O: Objective,
        R: Rng,
    {
        self.validate()?;
        if init.is_empty() {
            return Err(ConfigError::EmptyParameters.into());
        }

        let dims = init.len();
        let mut noise = NoiseMatrix::zeros(self.population, dims);
        let mut rewards = vec![0f32; self.population];
        let mut parent = init;
        let mut skipped = 0;

        // Momentum!
        let mut mom = self.momentum.map(|mu| Momentum {
            gradient: vec![0f32; dims],
            mu: mu,
        });

        tracing::info!(
            population = self.population,
            sigma = self.sigma,
            alpha = self.alpha,
            iterations = self.iterations,
            dims = dims,
            "starting natural evolution strategies"
        );

        let now = SystemTime::now();

        for pass in 0..(self.iterations) {
            if pass % self.report_iter == 0 {
                let fitness = objective.eval(&parent).map_err(|source| NesError::Objective {
                    iteration: pass,
                    source: source,
                })?;
                report(&now, pass, &parent, fitness, objective.target());
            }

            // Fresh noise every pass
            sampler.fill(&mut noise, self.antithetic);

            self.evaluate(objective, &parent, &noise, &mut rewards)
                .map_err(|source| NesError::Objective {
                    iteration: pass,
                    source: source,
                })?;

            if let Err(reason) = standardize(&mut rewards) {
                match self.degenerate {
                    DegeneratePolicy::Skip => {
                        tracing::warn!(iteration = pass, %reason, "skipping update");
                        skipped += 1;
                        continue;
                    }
                    DegeneratePolicy::Fail => {
                        return Err(NesError::DegenerateRewards {
                            iteration: pass,
                            reason: reason,
                        });
                    }
                }
            }

            if self.shape {
                fitness_shape(&mut rewards);
            }

            // Combine the noise to produce the actual gradient
            let mut new_gradient = noise.weighted_sum(&rewards);
            new_gradient.scale_gradients(self.step_size());

            // If momentum, update
            if let Some(ref mut m) = mom {
                m.update(&mut new_gradient);
            }

            parent.add_gradients(&new_gradient);
            tracing::debug!(iteration = pass, "applied update");
        }

        let fitness = objective.eval(&parent).map_err(|source| NesError::Objective {
            iteration: self.iterations,
            source: source,
        })?;
        tracing::info!(fitness = fitness, skipped = skipped, "finished");

        Ok(State::new(parent, fitness, skipped))
    }
}
