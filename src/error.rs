//! Error type shared by every stage of the evolutionary loop.

use std::io;

/// Errors raised while configuring or running the knapsack GA.
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("catalogue must contain at least one item")]
    EmptyCatalogue,

    #[error("item `{name}` is invalid: {reason}")]
    InvalidItem { name: String, reason: String },

    #[error("chromosome length mismatch: expected {expected}, found {found}")]
    ChromosomeLength { expected: usize, found: usize },

    #[error("population size mismatch: expected {expected}, found {found}")]
    PopulationSize { expected: usize, found: usize },

    /// Fitness is undefined because the population's scores sum to zero.
    #[error("degenerate population: total score is {total}")]
    DegeneratePopulation { total: f64 },

    #[error("mating pool is empty")]
    EmptyMatingPool,

    #[error("report output failed: {0}")]
    Report(#[from] io::Error),
}
