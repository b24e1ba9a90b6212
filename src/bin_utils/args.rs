use anyhow::{bail, Result};
use clap::{App, Arg, ArgMatches};

use nes_core::nes::{DegeneratePolicy, Natural};

use super::config::{ObjectiveKind, Problem};

/// Trait to add new arguments to the current app
pub trait ArgAugmenter {
    /// Type of struct to output from this parser
    type Output;

    /// Specifies arguments to add
    fn add_args<'a, 'b>(&self, app: App<'a, 'b>) -> App<'a, 'b>;

    /// Parses the arguments, overriding the fields of `base` that were given
    fn load_from_args<'a>(&self, args: &ArgMatches<'a>, base: Self::Output) -> Result<Self::Output>;
}

/// Struct defining the optimizer arguments using ArgAugmenter
pub struct OptimizerArgs;

impl ArgAugmenter for OptimizerArgs {
    type Output = Natural;

    /// Specifies arguments to add for the optimizer
    fn add_args<'a, 'b>(&self, app: App<'a, 'b>) -> App<'a, 'b> {
        app
      .arg(Arg::with_name("population")
           .short("n")
           .long("population")
           .takes_value(true)
           .help("Number of perturbed candidates per iteration"))
      .arg(Arg::with_name("sigma")
           .short("s")
           .long("sigma")
           .takes_value(true)
           .help("Standard deviation of the noise"))
      .arg(Arg::with_name("alpha")
           .short("a")
           .long("alpha")
           .takes_value(true)
           .help("Learning rate"))
      .arg(Arg::with_name("iters")
           .short("i")
           .long("iters")
           .takes_value(true)
           .help("Number of iterations to run before exiting"))
      .arg(Arg::with_name("report_iters")
           .short("r")
           .long("report")
           .takes_value(true)
           .help("How often to report progress."))
      .arg(Arg::with_name("momentum")
           .long("momentum")
           .takes_value(true)
           .help("Decay for momentum, in [0, 1)"))
      .arg(Arg::with_name("fitness_shaping")
           .long("fitness-shaping")
           .help("If provided, optimizes via fitness shaping"))
      .arg(Arg::with_name("antithetic")
           .long("antithetic")
           .help("Samples noise in mirrored pairs"))
      .arg(Arg::with_name("parallel")
           .long("parallel")
           .help("Evaluates the population in parallel"))
      .arg(Arg::with_name("on_degenerate")
           .long("on-degenerate")
           .takes_value(true)
           .possible_values(&["skip", "fail"])
           .help("What to do when all rewards in an iteration are equal"))
    }

    /// Parses the arguments for the optimizer
    fn load_from_args<'a>(&self, args: &ArgMatches<'a>, base: Natural) -> Result<Natural> {
        let mut settings = base;
        if args.is_present("population") {
            settings.population = value_t!(args, "population", usize)?;
        }
        if args.is_present("sigma") {
            settings.sigma = value_t!(args, "sigma", f32)?;
        }
        if args.is_present("alpha") {
            settings.alpha = value_t!(args, "alpha", f32)?;
        }
        if args.is_present("iters") {
            settings.iterations = value_t!(args, "iters", usize)?;
        }
        if args.is_present("report_iters") {
            settings.report_iter = value_t!(args, "report_iters", usize)?;
        }
        if args.is_present("momentum") {
            settings.momentum = Some(value_t!(args, "momentum", f32)?);
        }
        settings.shape |= args.is_present("fitness_shaping");
        settings.antithetic |= args.is_present("antithetic");
        settings.parallel |= args.is_present("parallel");

        settings.degenerate = match args.value_of("on_degenerate") {
            Some("skip") => DegeneratePolicy::Skip,
            Some("fail") => DegeneratePolicy::Fail,
            Some(other) => bail!("Undefined degenerate policy: {}", other),
            None => settings.degenerate,
        };

        settings.validate()?;
        Ok(settings)
    }
}

/// Struct defining the problem arguments using ArgAugmenter
pub struct ProblemArgs;

impl ArgAugmenter for ProblemArgs {
    type Output = Problem;

    /// Specifies arguments to add for the problem
    fn add_args<'a, 'b>(&self, app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("objective")
                .long("objective")
                .takes_value(true)
                .possible_values(&["target", "matyas", "ackley"])
                .help("Objective to optimize"),
        )
        .arg(
            Arg::with_name("target")
                .short("t")
                .long("target")
                .takes_value(true)
                .use_delimiter(true)
                .allow_hyphen_values(true)
                .help("Comma separated optimum for the target objective, e.g. 0.5,0.1,-0.3"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for the noise sampler and the initial parameters"),
        )
        .arg(
            Arg::with_name("zero_init")
                .long("zero-init")
                .help("Starts from the zero vector instead of a random draw"),
        )
    }

    /// Parses the arguments for the problem
    fn load_from_args<'a>(&self, args: &ArgMatches<'a>, base: Problem) -> Result<Problem> {
        let mut problem = base;
        problem.objective = match args.value_of("objective") {
            Some("target") => ObjectiveKind::Target,
            Some("matyas") => ObjectiveKind::Matyas,
            Some("ackley") => ObjectiveKind::Ackley,
            Some(other) => bail!("Undefined objective: {}", other),
            None => problem.objective,
        };
        if args.is_present("target") {
            problem.target = values_t!(args, "target", f32)?;
        }
        if args.is_present("seed") {
            problem.seed = value_t!(args, "seed", u64)?;
        }
        problem.zero_init |= args.is_present("zero_init");

        if problem.dims() == 0 {
            bail!("Target must have at least one dimension");
        }
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app<'a, 'b>() -> App<'a, 'b> {
        ProblemArgs.add_args(OptimizerArgs.add_args(App::new("nes-example")))
    }

    fn parse(argv: &[&str]) -> Result<(Natural, Problem)> {
        let matches = app().get_matches_from_safe(argv)?;
        let settings = OptimizerArgs.load_from_args(&matches, Natural::default())?;
        let problem = ProblemArgs.load_from_args(&matches, Problem::default())?;
        Ok((settings, problem))
    }

    #[test]
    fn test_defaults() {
        let (settings, problem) = parse(&["nes-example"]).unwrap();
        assert_eq!(settings, Natural::default());
        assert_eq!(problem, Problem::default());
    }

    #[test]
    fn test_overrides() {
        let (settings, problem) = parse(&[
            "nes-example",
            "-n",
            "20",
            "--sigma",
            "0.2",
            "--alpha",
            "0.01",
            "-i",
            "10",
            "--momentum",
            "0.9",
            "--antithetic",
            "--parallel",
            "--on-degenerate",
            "fail",
            "--target",
            "-1,0.5",
            "--seed",
            "12",
        ])
        .unwrap();

        assert_eq!(settings.population, 20);
        assert_eq!(settings.sigma, 0.2);
        assert_eq!(settings.alpha, 0.01);
        assert_eq!(settings.iterations, 10);
        assert_eq!(settings.momentum, Some(0.9));
        assert!(settings.antithetic && settings.parallel && !settings.shape);
        assert_eq!(settings.degenerate, DegeneratePolicy::Fail);
        assert_eq!(problem.target, vec![-1., 0.5]);
        assert_eq!(problem.seed, 12);
        assert_eq!(problem.dims(), 2);
    }

    #[test]
    fn test_flags_keep_base() {
        let matches = app().get_matches_from(vec!["nes-example", "--objective", "matyas"]);
        let base = Natural {
            population: 8,
            shape: true,
            ..Natural::default()
        };
        let settings = OptimizerArgs.load_from_args(&matches, base.clone()).unwrap();
        assert_eq!(settings, base);

        let problem = ProblemArgs.load_from_args(&matches, Problem::default()).unwrap();
        assert_eq!(problem.objective, ObjectiveKind::Matyas);
        assert_eq!(problem.dims(), 2);
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse(&["nes-example", "--sigma", "-1"]).is_err());
        assert!(parse(&["nes-example", "--population", "0"]).is_err());
        assert!(parse(&["nes-example", "--population", "lots"]).is_err());
        assert!(parse(&["nes-example", "--antithetic", "-n", "7"]).is_err());
        assert!(parse(&["nes-example", "--on-degenerate", "retry"]).is_err());
    }
}
