//! Example objectives

use nes_core::optimizer::Objective;
use thiserror::Error;

/// Raised when an objective is handed a vector of the wrong length
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} parameters, got {actual}")]
pub struct DimensionMismatch {
    /// Dimensionality the objective is defined for
    pub expected: usize,
    /// Length of the vector it received
    pub actual: usize,
}

fn check_dims(expected: usize, params: &[f32]) -> Result<(), DimensionMismatch> {
    if params.len() == expected {
        Ok(())
    } else {
        Err(DimensionMismatch {
            expected: expected,
            actual: params.len(),
        })
    }
}

/// Negative squared distance to a fixed target vector.  The maximum, 0, is
/// reached at the target.
#[derive(Clone, Debug)]
pub struct TargetDistance {
    target: Vec<f32>,
}

impl TargetDistance {
    /// Returns a new objective centered on `target`
    pub fn new(target: Vec<f32>) -> Self {
        TargetDistance { target: target }
    }
}

impl Objective for TargetDistance {
    type Error = DimensionMismatch;

    fn eval(&self, params: &[f32]) -> Result<f32, DimensionMismatch> {
        check_dims(self.target.len(), params)?;
        let sq: f32 = self
            .target
            .iter()
            .zip(params)
            .map(|(t, w)| (t - w).powi(2))
            .sum();
        Ok(-sq)
    }

    fn target(&self) -> Option<&[f32]> {
        Some(&self.target)
    }
}

const ORIGIN: [f32; 2] = [0., 0.];

/// Negated Matyas function, maximized at the origin
pub struct Matyas;

impl Objective for Matyas {
    type Error = DimensionMismatch;

    fn eval(&self, params: &[f32]) -> Result<f32, DimensionMismatch> {
        check_dims(2, params)?;
        let (x, y) = (params[0], params[1]);
        Ok(-(0.26 * (x.powi(2) + y.powi(2)) - 0.48 * x * y))
    }

    fn target(&self) -> Option<&[f32]> {
        Some(&ORIGIN)
    }
}

/// Negated Ackley function, maximized at the origin
pub struct Ackley;

impl Objective for Ackley {
    type Error = DimensionMismatch;

    fn eval(&self, params: &[f32]) -> Result<f32, DimensionMismatch> {
        check_dims(2, params)?;
        let x64 = params[0] as f64;
        let y64 = params[1] as f64;
        let tau = 2. * std::f64::consts::PI;
        let ack = -20. * (-0.2 * (0.5 * (x64.powi(2) + y64.powi(2))).sqrt()).exp()
            - (0.5 * ((tau * x64).cos() + (tau * y64).cos())).exp()
            + std::f64::consts::E
            + 20.;

        Ok(-(ack as f32))
    }

    fn target(&self) -> Option<&[f32]> {
        Some(&ORIGIN)
    }
}
