#[macro_use]
extern crate clap;

use anyhow::{Context, Result};
use clap::{App, Arg};
use rand::Rng;
use tracing_subscriber::filter::EnvFilter;

use nes::bin_utils::args::{ArgAugmenter, OptimizerArgs, ProblemArgs};
use nes::bin_utils::config::{read_config, ObjectiveKind, Problem, RunConfig};
use nes::example::{Ackley, Matyas, TargetDistance};

use nes_core::model::sampler::NoiseSampler;
use nes_core::nes::Natural;
use nes_core::optimizer::{Objective, Optimizer};

fn optimize<O, R>(
    optimizer: &Natural,
    problem: &Problem,
    objective: &O,
    sampler: &mut NoiseSampler<R>,
) -> Result<()>
where
    O: Objective,
    O::Error: Sync,
    R: Rng,
{
    let dims = problem.dims();
    let init = if problem.zero_init {
        vec![0f32; dims]
    } else {
        sampler.sample_vec(dims)
    };
    println!("Initial Model: {:?}", init);

    let results = optimizer
        .run(init, objective, sampler)
        .context("optimization aborted")?;
    println!(
        "Best Score: {}, Best Model: {:?}, Skipped Updates: {}",
        results.fitness, results.model, results.skipped_updates
    );
    if let Some(target) = objective.target() {
        println!("Target: {:?}", target);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::new("nes-example")
        .version(crate_version!())
        .about("Optimizes an example objective with Natural Evolution Strategies")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("JSON file with optimizer and problem settings"),
        );
    let app = ProblemArgs.add_args(OptimizerArgs.add_args(app));
    let args = app.get_matches();

    let config = match args.value_of("config") {
        Some(fname) => read_config(fname)?,
        None => RunConfig::default(),
    };
    let optimizer = OptimizerArgs.load_from_args(&args, config.optimizer)?;
    let problem = ProblemArgs.load_from_args(&args, config.problem)?;

    tracing::info!(seed = problem.seed, objective = ?problem.objective, "loaded settings");

    // One seeded source for both the initial draw and the noise
    let mut sampler = NoiseSampler::seeded(problem.seed);
    match problem.objective {
        ObjectiveKind::Target => {
            let objective = TargetDistance::new(problem.target.clone());
            optimize(&optimizer, &problem, &objective, &mut sampler)
        }
        ObjectiveKind::Matyas => optimize(&optimizer, &problem, &Matyas, &mut sampler),
        ObjectiveKind::Ackley => optimize(&optimizer, &problem, &Ackley, &mut sampler),
    }
}
