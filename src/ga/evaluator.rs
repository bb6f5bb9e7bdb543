//! Scoring and fitness.
//!
//! One [`Evaluator`] pass over a population sets, for every individual:
//!
//! 1. the raw score, following the configured [`ScoringPolicy`]
//! 2. the shifted score (soft penalty only): `score + |min| + 1`
//! 3. the fitness: `score / total_score * population_size`
//!
//! Fitness sums to the population size, which is exactly what stochastic
//! remainder sampling consumes.

use super::config::{DegeneratePolicy, ScoringPolicy, PENALTY_WEIGHT};
use super::population::Population;
use super::types::{Gene, Totals};
use crate::catalogue::Catalogue;
use crate::error::GaError;

/// Aggregates of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Sum of scores (after the shift) that fitness was normalised by.
    pub total_score: f64,
    /// Amount added to every score; 0.0 under the hard cutoff.
    pub shift: f64,
    /// Whether the uniform-fitness fallback was used.
    pub degenerate: bool,
}

/// Computes scores and fitness for a whole population.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalogue: &'a Catalogue,
    capacity: f64,
    scoring: ScoringPolicy,
    degenerate: DegeneratePolicy,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        catalogue: &'a Catalogue,
        capacity: f64,
        scoring: ScoringPolicy,
        degenerate: DegeneratePolicy,
    ) -> Self {
        Self {
            catalogue,
            capacity,
            scoring,
            degenerate,
        }
    }

    /// Raw score of a profit/cost pair under the configured policy.
    pub fn score(&self, totals: Totals) -> f64 {
        let overshoot = totals.cost - self.capacity;
        if overshoot <= 0.0 {
            return totals.profit;
        }
        match self.scoring {
            ScoringPolicy::HardCutoff => 0.0,
            ScoringPolicy::SoftPenalty => totals.profit - PENALTY_WEIGHT * overshoot,
        }
    }

    /// Scores, shifts, and assigns fitness to every individual in place.
    ///
    /// # Errors
    /// [`GaError::ChromosomeLength`] if a chromosome does not match the
    /// catalogue, and [`GaError::DegeneratePopulation`] when the total
    /// score is not positive and the policy is [`DegeneratePolicy::Fail`].
    pub fn evaluate<G: Gene>(&self, population: &mut Population<G>) -> Result<Evaluation, GaError> {
        let expected = self.catalogue.len();
        for ind in population.iter_mut() {
            let found = ind.chromosome().len();
            if found != expected {
                return Err(GaError::ChromosomeLength { expected, found });
            }
            let raw = self.score(ind.totals(self.catalogue));
            ind.set_scores(raw);
        }

        let shift = match self.scoring {
            ScoringPolicy::HardCutoff => 0.0,
            ScoringPolicy::SoftPenalty => {
                let min = population
                    .iter()
                    .filter_map(|ind| ind.score())
                    .fold(f64::INFINITY, f64::min);
                if min.is_finite() {
                    min.abs() + 1.0
                } else {
                    0.0
                }
            }
        };
        if shift != 0.0 {
            for ind in population.iter_mut() {
                ind.shift_score(shift);
            }
        }

        let total_score: f64 = population.iter().filter_map(|ind| ind.score()).sum();
        let size = population.len() as f64;

        if total_score <= 0.0 || !total_score.is_finite() {
            match self.degenerate {
                DegeneratePolicy::Fail => {
                    return Err(GaError::DegeneratePopulation { total: total_score })
                }
                DegeneratePolicy::Uniform => {
                    tracing::warn!(
                        total_score,
                        "degenerate population, falling back to uniform fitness"
                    );
                    for ind in population.iter_mut() {
                        ind.set_fitness(1.0);
                    }
                    return Ok(Evaluation {
                        total_score,
                        shift,
                        degenerate: true,
                    });
                }
            }
        }

        for ind in population.iter_mut() {
            let score = ind.score().unwrap_or(0.0);
            ind.set_fitness(score / total_score * size);
        }

        Ok(Evaluation {
            total_score,
            shift,
            degenerate: false,
        })
    }
}
