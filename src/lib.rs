//! Genetic-algorithm engine for knapsack problems.
//!
//! Given a catalogue of items, each with a cost and a profit, and a
//! capacity, the engine searches for the selection that maximizes total
//! profit without exceeding the capacity. Two variants share the same
//! evolutionary loop:
//!
//! - **0/1 knapsack**: boolean genes, hard-cutoff scoring, no elitism.
//! - **Bounded knapsack**: per-item quantities in `[0, max_count]`,
//!   soft-penalty scoring with a population-wide shift, four elites.
//!
//! # Example
//!
//! ```
//! use knapsack_ga::catalogue;
//! use knapsack_ga::ga::{GaConfig, GeneticAlgorithm};
//!
//! let items = catalogue::hiking();
//! let config = GaConfig::boolean(catalogue::HIKING_CAPACITY)
//!     .with_population_size(50)
//!     .with_generations(20)
//!     .with_seed(42);
//! let result = GeneticAlgorithm::new(&items, config)?.solve::<bool>()?;
//! assert!(result.cost <= catalogue::HIKING_CAPACITY);
//! # Ok::<(), knapsack_ga::GaError>(())
//! ```

pub mod catalogue;
pub mod error;
pub mod ga;
pub mod random;

pub use error::GaError;
