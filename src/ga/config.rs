//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::GaError;

/// Number of elites carried over when elitism is enabled.
pub const DEFAULT_ELITE_COUNT: usize = 4;

/// Weight of the linear malus applied by [`ScoringPolicy::SoftPenalty`].
pub const PENALTY_WEIGHT: f64 = 2.0;

/// How raw scores are derived from profit and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// Over-capacity individuals score 0, others score their profit.
    ///
    /// Scores are non-negative by construction; no shift is applied.
    #[default]
    HardCutoff,

    /// Over-capacity individuals score
    /// `profit - PENALTY_WEIGHT * (cost - capacity)`.
    ///
    /// The score may go negative, so after scoring the whole population
    /// every score is shifted by `|min| + 1` to keep fitness positive.
    SoftPenalty,
}

/// What to do when fitness cannot be derived from scores.
///
/// This happens when the population's scores sum to zero (every individual
/// infeasible under [`ScoringPolicy::HardCutoff`]) or when stochastic
/// remainder sampling yields an empty mating pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Give every individual fitness 1.0 and one mating-pool slot.
    #[default]
    Uniform,

    /// Abort the run with [`GaError::DegeneratePopulation`] or
    /// [`GaError::EmptyMatingPool`].
    Fail,
}

/// Configuration for the knapsack GA.
///
/// # Defaults
///
/// ```
/// use knapsack_ga::ga::{GaConfig, ScoringPolicy};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.scoring, ScoringPolicy::HardCutoff);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_ga::ga::{GaConfig, ScoringPolicy};
///
/// let config = GaConfig::bounded(15_000.0)
///     .with_population_size(500)
///     .with_generations(300)
///     .with_mutation_rate(0.001)
///     .with_seed(42);
/// assert_eq!(config.scoring, ScoringPolicy::SoftPenalty);
/// assert_eq!(config.elite_count, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run. There is no early exit.
    pub generations: usize,

    /// Knapsack capacity; totals above it are infeasible.
    pub capacity: f64,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    pub scoring: ScoringPolicy,

    /// Best individuals copied unchanged into the next generation.
    ///
    /// 0 disables elitism.
    pub elite_count: usize,

    pub degenerate: DegeneratePolicy,

    /// Seed used by [`GeneticAlgorithm::solve`](super::GeneticAlgorithm::solve).
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            capacity: 0.0,
            mutation_rate: 0.01,
            scoring: ScoringPolicy::HardCutoff,
            elite_count: 0,
            degenerate: DegeneratePolicy::Uniform,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Preset for the 0/1 variant: hard cutoff scoring, no elitism.
    pub fn boolean(capacity: f64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Preset for the bounded variant: soft penalty scoring with
    /// [`DEFAULT_ELITE_COUNT`] elites.
    pub fn bounded(capacity: f64) -> Self {
        Self {
            capacity,
            scoring: ScoringPolicy::SoftPenalty,
            elite_count: DEFAULT_ELITE_COUNT,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the mutation rate. Out-of-range values are kept as given and
    /// rejected by [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enables ([`DEFAULT_ELITE_COUNT`] elites) or disables elitism.
    pub fn with_elitism(mut self, enabled: bool) -> Self {
        self.elite_count = if enabled { DEFAULT_ELITE_COUNT } else { 0 };
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(GaError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(GaError::InvalidConfig(format!(
                "capacity must be finite and non-negative, got {}",
                self.capacity
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elite_count >= self.population_size {
            return Err(GaError::InvalidConfig(format!(
                "elite_count ({}) must be smaller than population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        Ok(())
    }
}
