//! NES-Core
//! ===
//!
//! This library contains a small black-box optimizer based on Natural Evolution
//! Strategies (NES).  Each iteration perturbs the current parameter vector with
//! isotropic Gaussian noise, evaluates the caller's objective at every perturbed
//! candidate and moves the parameters along the reward-weighted average of the
//! noise directions.
//!
//! Natural Evolutionary Strategies
//! ---
//! The search gradient is estimated as `Σ A[j] N[j] / (n σ)`, where `A` are the
//! standardized rewards.  The learning rate α is fixed ala Salimans et al.
//! Optional extras are antithetic sampling, momentum and rank-based fitness
//! shaping (Wierstra et al.).
//!
//! Randomness
//! ---
//! There is no global random generator: every run draws its noise from a
//! [`model::sampler::NoiseSampler`] handed in by the caller, so the same seed
//! always produces the same trajectory.

#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Error types for configuration, degenerate rewards and objective failures
pub mod error;

/// Parameter vector arithmetic and the noise matrix
pub mod model;

/// Defines interfaces for objectives and optimizers
pub mod optimizer;

/// Defines the Natural ES optimizer
pub mod nes;
