//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the generational process for a fixed
//! number of generations:
//! evaluation → best-ever tracking → selection → crossover + mutation →
//! elite carry-over → repeat.

use super::config::GaConfig;
use super::evaluator::Evaluator;
use super::operators::Crossover;
use super::population::Population;
use super::report::{GenerationObserver, NoopObserver};
use super::selection::MatingPool;
use super::types::{sort_key, Gene, Individual};
use crate::catalogue::Catalogue;
use crate::error::GaError;
use crate::random::create_rng;
use rand::Rng;

/// Snapshot of one generation, recorded after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    /// Highest raw score in the live population.
    pub population_best_score: f64,
    /// Mean raw score of the live population.
    pub mean_score: f64,
    /// Raw score of the best individual seen so far.
    pub best_ever_score: f64,
    pub best_ever_profit: f64,
    pub best_ever_cost: f64,
    pub best_ever_feasible: bool,
    /// Shift the evaluator added to every score.
    pub shift: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<G: Gene> {
    /// The best individual found during the entire run.
    pub best: Individual<G>,

    /// Raw score of `best`.
    pub best_score: f64,

    pub profit: f64,
    pub cost: f64,

    /// Whether `best` fits within the capacity.
    pub feasible: bool,

    /// Total number of generations executed.
    pub generations: usize,

    pub history: Vec<GenerationStats>,
}

/// Runs the knapsack GA over a catalogue.
///
/// # Usage
///
/// ```
/// use knapsack_ga::catalogue::{Catalogue, Item};
/// use knapsack_ga::ga::{GaConfig, GeneticAlgorithm};
///
/// let catalogue = Catalogue::new(vec![
///     Item::new("a", 10.0, 6.0),
///     Item::new("b", 20.0, 10.0),
///     Item::new("c", 30.0, 12.0),
/// ])?;
/// let config = GaConfig::boolean(30.0)
///     .with_population_size(20)
///     .with_generations(30)
///     .with_seed(1);
/// let ga = GeneticAlgorithm::new(&catalogue, config)?;
/// let result = ga.solve::<bool>()?;
/// assert!(result.feasible);
/// # Ok::<(), knapsack_ga::GaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<'a> {
    catalogue: &'a Catalogue,
    config: GaConfig,
}

impl<'a> GeneticAlgorithm<'a> {
    /// Validates `config` and binds it to `catalogue`.
    pub fn new(catalogue: &'a Catalogue, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        if catalogue.is_empty() {
            return Err(GaError::EmptyCatalogue);
        }
        Ok(Self { catalogue, config })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.catalogue
    }

    /// Runs with an RNG seeded from `config.seed` (random when unset) and
    /// no observer.
    pub fn solve<G: Gene>(&self) -> Result<GaResult<G>, GaError> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        self.run(&mut rng, &mut NoopObserver)
    }

    /// Runs from a freshly drawn random population.
    pub fn run<G, R, O>(&self, rng: &mut R, observer: &mut O) -> Result<GaResult<G>, GaError>
    where
        G: Gene,
        R: Rng,
        O: GenerationObserver<G>,
    {
        let population = Population::random(self.catalogue, self.config.population_size, rng);
        self.evolve(population, rng, observer)
    }

    /// Runs from a caller-supplied initial population.
    pub fn evolve<G, R, O>(
        &self,
        mut population: Population<G>,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<GaResult<G>, GaError>
    where
        G: Gene,
        R: Rng,
        O: GenerationObserver<G>,
    {
        let config = &self.config;
        if population.len() != config.population_size {
            return Err(GaError::PopulationSize {
                expected: config.population_size,
                found: population.len(),
            });
        }

        let evaluator = Evaluator::new(
            self.catalogue,
            config.capacity,
            config.scoring,
            config.degenerate,
        );
        let crossover = Crossover::new(self.catalogue, config.mutation_rate);

        tracing::info!(
            items = self.catalogue.len(),
            population_size = config.population_size,
            generations = config.generations,
            capacity = config.capacity,
            scoring = ?config.scoring,
            elite_count = config.elite_count,
            "starting knapsack GA"
        );

        let mut best_ever: Option<Individual<G>> = None;
        let mut history = Vec::with_capacity(config.generations);

        for generation in 0..config.generations {
            // 1. Evaluate
            let evaluation = evaluator.evaluate(&mut population)?;

            // 2. Record best
            if let Some(best) = population.best() {
                if best.is_better_than(best_ever.as_ref()) {
                    best_ever = Some(best.clone());
                }
            }
            let best = best_ever.as_ref().ok_or(GaError::PopulationSize {
                expected: config.population_size,
                found: 0,
            })?;
            let stats = self.stats(generation, &population, best, evaluation.shift);
            tracing::debug!(
                generation,
                population_best = stats.population_best_score,
                mean = stats.mean_score,
                best_ever = stats.best_ever_score,
                shift = stats.shift,
                "generation evaluated"
            );
            observer.on_generation(&stats, best, self.catalogue)?;
            history.push(stats);

            // 3. Reproduce; the last generation's offspring would never be seen.
            if generation + 1 < config.generations {
                population = self.next_generation(population, &crossover, rng)?;
            }
        }

        let best = best_ever.ok_or(GaError::PopulationSize {
            expected: config.population_size,
            found: 0,
        })?;
        observer.on_finish(&best, self.catalogue)?;

        let totals = best.totals(self.catalogue);
        let best_score = sort_key(best.raw_score());
        tracing::info!(
            best_score,
            profit = totals.profit,
            cost = totals.cost,
            "knapsack GA finished"
        );

        Ok(GaResult {
            best_score,
            profit: totals.profit,
            cost: totals.cost,
            feasible: totals.is_feasible(config.capacity),
            best,
            generations: config.generations,
            history,
        })
    }

    /// Builds the next population from an evaluated one.
    ///
    /// With `elite_count > 0`, the top individuals by score are set aside
    /// unchanged and the mating pool is built from the rest only.
    fn next_generation<G: Gene, R: Rng>(
        &self,
        population: Population<G>,
        crossover: &Crossover<'_>,
        rng: &mut R,
    ) -> Result<Population<G>, GaError> {
        let size = self.config.population_size;
        let mut candidates = population.into_individuals();

        let elite = if self.config.elite_count > 0 {
            candidates.sort_by(|a, b| sort_key(a.score()).total_cmp(&sort_key(b.score())));
            candidates.split_off(candidates.len() - self.config.elite_count)
        } else {
            Vec::new()
        };

        let pool = MatingPool::build(&candidates, self.config.degenerate, rng)?;
        let mut offspring = Vec::with_capacity(size);
        for _ in 0..candidates.len() {
            let parent1 = pool.sample(rng);
            let parent2 = pool.sample(rng);
            offspring.push(crossover.two_point(parent1, parent2, rng)?);
        }
        offspring.extend(elite);

        Population::from_individuals(offspring, size)
    }

    fn stats<G: Gene>(
        &self,
        generation: usize,
        population: &Population<G>,
        best_ever: &Individual<G>,
        shift: f64,
    ) -> GenerationStats {
        let raw: Vec<f64> = population.iter().filter_map(|ind| ind.raw_score()).collect();
        let population_best_score = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_score = if raw.is_empty() {
            0.0
        } else {
            raw.iter().sum::<f64>() / raw.len() as f64
        };
        let totals = best_ever.totals(self.catalogue);
        GenerationStats {
            generation,
            population_best_score,
            mean_score,
            best_ever_score: sort_key(best_ever.raw_score()),
            best_ever_profit: totals.profit,
            best_ever_cost: totals.cost,
            best_ever_feasible: totals.is_feasible(self.config.capacity),
            shift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{self, Item};
    use crate::ga::config::{DegeneratePolicy, ScoringPolicy};
    use crate::ga::report::TextReport;

    fn three_items() -> Catalogue {
        Catalogue::new(vec![
            Item::new("a", 10.0, 6.0),
            Item::new("b", 20.0, 10.0),
            Item::new("c", 30.0, 12.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let catalogue = three_items();
        let config = GaConfig::boolean(30.0).with_mutation_rate(2.0);
        assert!(matches!(
            GeneticAlgorithm::new(&catalogue, config),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_converges_on_three_item_knapsack() {
        let catalogue = three_items();
        let config = GaConfig::boolean(30.0)
            .with_population_size(50)
            .with_generations(200)
            .with_mutation_rate(0.01);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let mut rng = create_rng(42);
        let result: GaResult<bool> = ga.run(&mut rng, &mut NoopObserver).unwrap();

        assert!(result.best_score >= 14.0, "best score {}", result.best_score);
        assert!(result.feasible);
        assert_eq!(result.generations, 200);
        assert_eq!(result.history.len(), 200);
    }

    #[test]
    fn test_best_ever_never_regresses() {
        let catalogue = catalogue::hiking();
        let config = GaConfig::boolean(catalogue::HIKING_CAPACITY)
            .with_population_size(60)
            .with_generations(40)
            .with_seed(3);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let result = ga.solve::<bool>().unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[1].best_ever_score >= pair[0].best_ever_score);
        }
        let last = result.history.last().unwrap();
        assert_eq!(last.best_ever_score, result.best_score);
    }

    #[test]
    fn test_elitism_keeps_population_best_monotonic() {
        let catalogue = catalogue::cac40();
        let config = GaConfig::bounded(catalogue::CAC40_CAPACITY)
            .with_population_size(40)
            .with_generations(30)
            .with_mutation_rate(0.01);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let mut rng = create_rng(11);
        let result: GaResult<u32> = ga.run(&mut rng, &mut NoopObserver).unwrap();

        for pair in result.history.windows(2) {
            assert!(pair[1].population_best_score >= pair[0].population_best_score);
            assert!(pair[1].best_ever_score >= pair[0].best_ever_score);
        }
        for gene in result.best.chromosome() {
            assert!(*gene <= 100);
        }
    }

    #[test]
    fn test_soft_penalty_improves_bounded_portfolio() {
        let catalogue = catalogue::cac40();
        let config = GaConfig::bounded(catalogue::CAC40_CAPACITY)
            .with_population_size(60)
            .with_generations(60)
            .with_mutation_rate(0.01);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let mut rng = create_rng(2024);
        let result: GaResult<u32> = ga.run(&mut rng, &mut NoopObserver).unwrap();
        let first = result.history.first().unwrap().best_ever_score;
        assert!(result.best_score > first);
    }

    #[test]
    fn test_same_seed_same_result() {
        let catalogue = catalogue::hiking();
        let config = GaConfig::boolean(catalogue::HIKING_CAPACITY)
            .with_population_size(30)
            .with_generations(20)
            .with_seed(99);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let a = ga.solve::<bool>().unwrap();
        let b = ga.solve::<bool>().unwrap();
        assert_eq!(a.best.chromosome(), b.best.chromosome());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_population_size_preserved_with_elites() {
        let catalogue = catalogue::cac40();
        let config = GaConfig::bounded(catalogue::CAC40_CAPACITY).with_population_size(10);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let mut rng = create_rng(1);
        let mut population = Population::<u32>::random(&catalogue, 10, &mut rng);
        Evaluator::new(
            &catalogue,
            catalogue::CAC40_CAPACITY,
            ScoringPolicy::SoftPenalty,
            DegeneratePolicy::Uniform,
        )
        .evaluate(&mut population)
        .unwrap();

        let mut top: Vec<Vec<u32>> = {
            let mut sorted = population.as_slice().to_vec();
            sorted.sort_by(|a, b| sort_key(a.score()).total_cmp(&sort_key(b.score())));
            sorted[6..].iter().map(|i| i.chromosome().to_vec()).collect()
        };
        let crossover = Crossover::new(&catalogue, 0.01);
        let next = ga.next_generation(population, &crossover, &mut rng).unwrap();
        assert_eq!(next.len(), 10);

        // Elites are carried over unchanged at the end.
        let mut carried: Vec<Vec<u32>> = next.as_slice()[6..]
            .iter()
            .map(|i| i.chromosome().to_vec())
            .collect();
        top.sort();
        carried.sort();
        assert_eq!(top, carried);
    }

    #[test]
    fn test_degenerate_population_fails_under_fail_policy() {
        let catalogue = three_items();
        let config = GaConfig::boolean(30.0)
            .with_population_size(2)
            .with_generations(1)
            .with_degenerate_policy(DegeneratePolicy::Fail);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let population = Population::from_individuals(
            vec![
                Individual::from_chromosome(vec![true, true, true]),
                Individual::from_chromosome(vec![false, true, true]),
            ],
            2,
        )
        .unwrap();
        let mut rng = create_rng(1);
        let result = ga.evolve(population, &mut rng, &mut NoopObserver);
        assert!(matches!(result, Err(GaError::DegeneratePopulation { .. })));
    }

    #[test]
    fn test_degenerate_population_uniform_fallback_continues() {
        let catalogue = three_items();
        let config = GaConfig::boolean(30.0)
            .with_population_size(2)
            .with_generations(5);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let population = Population::from_individuals(
            vec![
                Individual::from_chromosome(vec![true, true, true]),
                Individual::from_chromosome(vec![true, true, true]),
            ],
            2,
        )
        .unwrap();
        let mut rng = create_rng(1);
        let result = ga.evolve(population, &mut rng, &mut NoopObserver).unwrap();
        assert_eq!(result.history.len(), 5);
    }

    #[test]
    fn test_wrong_initial_population_size() {
        let catalogue = three_items();
        let ga = GeneticAlgorithm::new(&catalogue, GaConfig::boolean(30.0)).unwrap();
        let mut rng = create_rng(1);
        let population = Population::<bool>::random(&catalogue, 3, &mut rng);
        assert!(matches!(
            ga.evolve(population, &mut rng, &mut NoopObserver),
            Err(GaError::PopulationSize { expected: 100, found: 3 })
        ));
    }

    #[test]
    fn test_text_report_output() {
        let catalogue = three_items();
        let config = GaConfig::boolean(30.0)
            .with_population_size(4)
            .with_generations(3);
        let ga = GeneticAlgorithm::new(&catalogue, config).unwrap();
        let population = Population::from_individuals(
            vec![
                Individual::from_chromosome(vec![true, false, false]),
                Individual::from_chromosome(vec![true, true, false]),
                Individual::from_chromosome(vec![false, false, true]),
                Individual::from_chromosome(vec![true, true, true]),
            ],
            4,
        )
        .unwrap();
        let mut rng = create_rng(8);
        let mut report = TextReport::new(Vec::new());
        ga.evolve(population, &mut rng, &mut report).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "VALID     Gen: 0 Profit: 16 Cost: 30");
        assert_eq!(lines[2], "VALID     Gen: 2 Profit: 16 Cost: 30");
        assert_eq!(lines[3], "----------------------");
        assert_eq!(lines[4], "Best ever");
        assert_eq!(lines[6], "Profit: 16");
        assert_eq!(lines[7], "Cost:   30");
        assert_eq!(&lines[lines.len() - 3..], &["true a", "true b", "false c"][..]);
    }
}
