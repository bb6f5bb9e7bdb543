use anyhow::{anyhow, bail, Context, Result};
use clap::{arg, value_parser, ArgMatches, Command};
use knapsack_ga::catalogue::{self, Catalogue, Item};
use knapsack_ga::ga::{GaConfig, Gene, GeneticAlgorithm, TextReport};
use knapsack_ga::random::create_rng;
use std::{fs, io, path::Path};
use tracing::Level;

fn cli() -> Command {
    Command::new("knapsack-ga")
        .about("Solves 0/1 and bounded knapsack problems with a genetic algorithm")
        .arg(
            arg!(--catalogue [CATALOGUE] "Built-in catalogue (hiking, cac40) or path to a JSON item list")
                .default_value("hiking"),
        )
        .arg(
            arg!(--variant [VARIANT] "Gene encoding; defaults to bounded when items carry max_count")
                .value_parser(["boolean", "bounded"]),
        )
        .arg(arg!(-g --generations [N] "Number of generations").value_parser(value_parser!(usize)))
        .arg(arg!(-p --population [N] "Population size").value_parser(value_parser!(usize)))
        .arg(arg!(-c --capacity [CAPACITY] "Knapsack capacity").value_parser(value_parser!(f64)))
        .arg(
            arg!(-m --"mutation-rate" [RATE] "Per-gene mutation probability")
                .value_parser(value_parser!(f64)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(value_parser!(u64)))
        .arg(
            arg!(--elitism [MODE] "Carry the best individuals over unchanged")
                .value_parser(["on", "off"]),
        )
        .arg(arg!(-v --verbose "Log every generation").action(clap::ArgAction::SetTrue))
}

/// Catalogue plus the run defaults that go with it.
struct Problem {
    catalogue: Catalogue,
    capacity: f64,
    generations: usize,
    mutation_rate: f64,
}

fn load_problem(name: &str) -> Result<Problem> {
    match name {
        "hiking" => Ok(Problem {
            catalogue: catalogue::hiking(),
            capacity: catalogue::HIKING_CAPACITY,
            generations: 100,
            mutation_rate: 0.01,
        }),
        "cac40" => Ok(Problem {
            catalogue: catalogue::cac40(),
            capacity: catalogue::CAC40_CAPACITY,
            generations: 1_000,
            mutation_rate: 1.0 / 1_000.0,
        }),
        path => {
            let text = fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading catalogue {path}"))?;
            let items: Vec<Item> = serde_json::from_str(&text)
                .with_context(|| format!("parsing catalogue {path}"))?;
            Ok(Problem {
                catalogue: Catalogue::new(items)?,
                capacity: 0.0,
                generations: 100,
                mutation_rate: 0.01,
            })
        }
    }
}

fn build_config(matches: &ArgMatches, problem: &Problem, bounded: bool) -> GaConfig {
    let capacity = matches
        .get_one::<f64>("capacity")
        .copied()
        .unwrap_or(problem.capacity);
    let mut config = if bounded {
        GaConfig::bounded(capacity)
    } else {
        GaConfig::boolean(capacity)
    };
    config = config
        .with_population_size(matches.get_one::<usize>("population").copied().unwrap_or(1_000))
        .with_generations(
            matches
                .get_one::<usize>("generations")
                .copied()
                .unwrap_or(problem.generations),
        )
        .with_mutation_rate(
            matches
                .get_one::<f64>("mutation-rate")
                .copied()
                .unwrap_or(problem.mutation_rate),
        );
    if let Some(mode) = matches.get_one::<String>("elitism") {
        config = config.with_elitism(mode == "on");
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    config
}

fn run<G: Gene>(catalogue: &Catalogue, config: GaConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let ga = GeneticAlgorithm::new(catalogue, config)?;
    let mut rng = create_rng(seed);
    let mut report = TextReport::new(io::stdout().lock());
    let result = ga.run::<G, _, _>(&mut rng, &mut report)?;
    if !result.feasible {
        tracing::warn!(cost = result.cost, "best individual exceeds capacity");
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let name = matches
        .get_one::<String>("catalogue")
        .ok_or_else(|| anyhow!("missing catalogue"))?;
    let problem = load_problem(name)?;

    let bounded = match matches.get_one::<String>("variant").map(String::as_str) {
        Some("bounded") => true,
        Some("boolean") => false,
        Some(other) => bail!("unknown variant {other}"),
        None => problem.catalogue.is_bounded(),
    };
    let config = build_config(&matches, &problem, bounded);

    if bounded {
        run::<u32>(&problem.catalogue, config)
    } else {
        run::<bool>(&problem.catalogue, config)
    }
}
