//! Error taxonomy for the optimizer.
//!
//! Hyperparameter problems are reported before any noise is drawn.  Objective
//! failures are passed back untouched, tagged with the iteration they
//! happened in.
use std::error::Error as StdError;

use thiserror::Error;

/// Invalid optimizer settings or inputs, detected before sampling starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Population size of zero
    #[error("population size must be positive")]
    EmptyPopulation,

    /// sigma or alpha is zero, negative, NaN or infinite
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive {
        /// Name of the hyperparameter
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Reporting every zero iterations
    #[error("report interval must be positive")]
    ZeroReportInterval,

    /// Mirrored sampling needs pairs of rows
    #[error("antithetic sampling requires an even population, got {0}")]
    OddAntitheticPopulation(usize),

    /// Momentum coefficient outside of [0, 1)
    #[error("momentum must lie in [0, 1), got {0}")]
    Momentum(f32),

    /// Initial parameter vector has no dimensions
    #[error("initial parameter vector is empty")]
    EmptyParameters,
}

/// Why a reward vector could not be standardized
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    /// Every reward is identical, so the standard deviation is zero
    #[error("all rewards are equal")]
    ZeroVariance,

    /// A reward, its mean or its deviation is NaN or infinite
    #[error("rewards contain non-finite values")]
    NonFinite,
}

/// Errors produced by a run of the optimizer.  `E` is the objective's own
/// error type.
#[derive(Error, Debug)]
pub enum NesError<E>
where
    E: StdError + 'static,
{
    /// Settings failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rewards could not be standardized and the policy is to fail
    #[error("degenerate rewards at iteration {iteration}: {reason}")]
    DegenerateRewards {
        /// Iteration at which the rewards were collected
        iteration: usize,
        /// What was wrong with them
        reason: Degenerate,
    },

    /// The objective returned an error
    #[error("objective failed at iteration {iteration}")]
    Objective {
        /// Iteration at which the objective was called
        iteration: usize,
        /// Error returned by the objective
        #[source]
        source: E,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_messages() {
        let err = ConfigError::NonPositive {
            name: "sigma",
            value: -0.5,
        };
        assert_eq!(err.to_string(), "sigma must be a positive finite number, got -0.5");

        let err: NesError<Infallible> = NesError::DegenerateRewards {
            iteration: 3,
            reason: Degenerate::ZeroVariance,
        };
        assert_eq!(
            err.to_string(),
            "degenerate rewards at iteration 3: all rewards are equal"
        );
    }

    #[test]
    fn test_config_is_transparent() {
        let err: NesError<Infallible> = ConfigError::EmptyPopulation.into();
        assert_eq!(err.to_string(), "population size must be positive");
        match err {
            NesError::Config(ConfigError::EmptyPopulation) => (),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
