//! Config
//! ---
//!
//! Reads the optimizer settings and the problem definition from a JSON file.
//! Every field is optional; missing fields fall back to the walkthrough
//! defaults.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use nes_core::nes::Natural;

/// Which example objective to optimize
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    /// Negative squared distance to `Problem::target`
    Target,
    /// Two dimensional Matyas function
    Matyas,
    /// Two dimensional Ackley function
    Ackley,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
/// Objective, seed and starting point
pub struct Problem {
    /// Seed for the noise sampler
    pub seed: u64,
    /// Objective to optimize
    pub objective: ObjectiveKind,
    /// Optimum used by the target objective
    pub target: Vec<f32>,
    /// Start from the zero vector instead of a seeded random draw
    pub zero_init: bool,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            seed: 0,
            objective: ObjectiveKind::Target,
            target: vec![0.5, 0.1, -0.3],
            zero_init: false,
        }
    }
}

impl Problem {
    /// Dimensionality of the parameter vector for the chosen objective
    pub fn dims(&self) -> usize {
        match self.objective {
            ObjectiveKind::Target => self.target.len(),
            ObjectiveKind::Matyas | ObjectiveKind::Ackley => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
/// Contents of a run config file
pub struct RunConfig {
    /// Hyperparameters
    pub optimizer: Natural,
    /// What to optimize
    pub problem: Problem,
}

/// Parses a run config from a JSON string
pub fn parse_config(contents: &str) -> Result<RunConfig> {
    serde_json::from_str(contents).context("run config JSON was not well-formatted")
}

/// Reads a run config from a JSON file
pub fn read_config<P: AsRef<Path>>(fname: P) -> Result<RunConfig> {
    let fname = fname.as_ref();
    let contents = fs::read_to_string(fname)
        .with_context(|| format!("Error reading config file: {}", fname.display()))?;
    parse_config(&contents).with_context(|| format!("Error parsing config file: {}", fname.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use nes_core::nes::DegeneratePolicy;

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"{
                "optimizer": {"population": 20, "sigma": 0.05, "degenerate": "fail"},
                "problem": {"objective": "ackley", "seed": 7}
            }"#,
        )
        .unwrap();

        assert_eq!(config.optimizer.population, 20);
        assert_eq!(config.optimizer.sigma, 0.05);
        assert_eq!(config.optimizer.alpha, 0.001);
        assert_eq!(config.optimizer.degenerate, DegeneratePolicy::Fail);
        assert_eq!(config.problem.objective, ObjectiveKind::Ackley);
        assert_eq!(config.problem.seed, 7);
        assert_eq!(config.problem.dims(), 2);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("{}").unwrap(), RunConfig::default());
        assert_eq!(RunConfig::default().problem.dims(), 3);
    }

    #[test]
    fn test_bad_config() {
        assert!(parse_config(r#"{"optimizer": {"population": "many"}}"#).is_err());
        assert!(parse_config("not json").is_err());
    }

    #[test]
    fn test_read_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"problem": {{"target": [1.0, 2.0], "zero_init": true}}}}"#).unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.problem.target, vec![1., 2.]);
        assert!(config.problem.zero_init);

        let err = read_config("/does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("Error reading config file"));
    }
}
