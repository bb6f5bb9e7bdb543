//! Genetic Algorithm for knapsack problems.
//!
//! The engine is generic over the gene encoding ([`Gene`]): `bool` for the
//! 0/1 knapsack, `u32` for the bounded-quantity knapsack. One generation
//! runs:
//!
//! 1. [`Evaluator`]: raw score per [`ScoringPolicy`], optional shift, fitness
//! 2. best-ever tracking
//! 3. [`MatingPool`]: stochastic remainder sampling of parents
//! 4. [`Crossover`]: two-point crossover followed by per-gene mutation
//! 5. elite carry-over when `elite_count > 0`
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters and presets
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop
//! - [`GaResult`]: Best individual and per-generation statistics
//! - [`GenerationObserver`]: Reporting hook, see [`TextReport`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod evaluator;
pub mod operators;
mod population;
mod report;
mod runner;
mod selection;
mod types;

pub use config::{DegeneratePolicy, GaConfig, ScoringPolicy, DEFAULT_ELITE_COUNT, PENALTY_WEIGHT};
pub use evaluator::{Evaluation, Evaluator};
pub use operators::Crossover;
pub use population::Population;
pub use report::{GenerationObserver, NoopObserver, TextReport};
pub use runner::{GaResult, GenerationStats, GeneticAlgorithm};
pub use selection::MatingPool;
pub use types::{listing, Gene, Individual, Totals};
