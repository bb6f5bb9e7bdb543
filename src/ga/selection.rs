//! Stochastic remainder selection.
//!
//! Each individual with fitness `f` gets `floor(f)` guaranteed slots in the
//! mating pool plus one extra slot with probability `f - floor(f)`, so its
//! expected number of slots is exactly `f`. Parents are then drawn
//! uniformly, with replacement, from the pool.
//!
//! # References
//!
//! - Booker (1982), *Intelligent Behavior as an Adaptation to the Task
//!   Environment*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, §4.3

use super::config::DegeneratePolicy;
use super::types::{Gene, Individual};
use crate::error::GaError;
use rand::Rng;

/// Sampling structure built fresh from one generation's fitness values.
///
/// Slots are indices into the individuals the pool was built from, so
/// sampling never copies a chromosome; offspring are assembled into new
/// vectors by crossover.
#[derive(Debug)]
pub struct MatingPool<'a, G: Gene> {
    individuals: &'a [Individual<G>],
    slots: Vec<usize>,
}

impl<'a, G: Gene> MatingPool<'a, G> {
    /// Builds the pool from evaluated individuals.
    ///
    /// Individuals without a fitness value get no slots. If no slot is
    /// filled, [`DegeneratePolicy::Uniform`] gives every individual one
    /// slot and [`DegeneratePolicy::Fail`] returns
    /// [`GaError::EmptyMatingPool`].
    pub fn build<R: Rng>(
        individuals: &'a [Individual<G>],
        degenerate: DegeneratePolicy,
        rng: &mut R,
    ) -> Result<Self, GaError> {
        let expected: f64 = individuals.iter().filter_map(|ind| ind.fitness()).sum();
        let mut slots = Vec::with_capacity(expected.ceil().max(0.0) as usize + 1);

        for (index, ind) in individuals.iter().enumerate() {
            let fitness = match ind.fitness() {
                Some(f) if f.is_finite() && f > 0.0 => f,
                _ => continue,
            };
            let guaranteed = fitness.floor();
            let remainder = fitness - guaranteed;
            for _ in 0..guaranteed as usize {
                slots.push(index);
            }
            if rng.random::<f64>() < remainder {
                slots.push(index);
            }
        }

        if slots.is_empty() {
            match degenerate {
                DegeneratePolicy::Fail => return Err(GaError::EmptyMatingPool),
                DegeneratePolicy::Uniform => {
                    if individuals.is_empty() {
                        return Err(GaError::EmptyMatingPool);
                    }
                    tracing::warn!(
                        candidates = individuals.len(),
                        "empty mating pool, falling back to one slot per individual"
                    );
                    slots.extend(0..individuals.len());
                }
            }
        }

        Ok(Self { individuals, slots })
    }

    /// Draws one parent uniformly from the pool.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &'a Individual<G> {
        let slot = self.slots[rng.random_range(0..self.slots.len())];
        &self.individuals[slot]
    }

    /// Number of slots in the pool.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots held by the individual at `index`.
    pub fn copies_of(&self, index: usize) -> usize {
        self.slots.iter().filter(|&&slot| slot == index).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn with_fitness(values: &[f64]) -> Vec<Individual<bool>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::from_chromosome(vec![i % 2 == 0]);
                ind.set_scores(f);
                ind.set_fitness(f);
                ind
            })
            .collect()
    }

    #[test]
    fn test_guaranteed_copies() {
        let inds = with_fitness(&[3.0, 1.0, 0.0]);
        let mut rng = create_rng(42);
        let pool = MatingPool::build(&inds, DegeneratePolicy::Fail, &mut rng).unwrap();
        assert_eq!(pool.copies_of(0), 3);
        assert_eq!(pool.copies_of(1), 1);
        assert_eq!(pool.copies_of(2), 0);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_expected_copies_match_fitness() {
        let fitness = [2.5, 0.3, 1.2, 0.0];
        let inds = with_fitness(&fitness);
        let mut rng = create_rng(42);
        let trials = 10_000;
        let mut totals = [0usize; 4];
        for _ in 0..trials {
            let pool = MatingPool::build(&inds, DegeneratePolicy::Fail, &mut rng).unwrap();
            for (i, total) in totals.iter_mut().enumerate() {
                *total += pool.copies_of(i);
            }
        }
        for (i, &f) in fitness.iter().enumerate() {
            let mean = totals[i] as f64 / trials as f64;
            if f == 0.0 {
                assert_eq!(totals[i], 0);
            } else {
                assert!(
                    (mean - f).abs() <= 0.05 * f,
                    "individual {i}: mean copies {mean}, fitness {f}"
                );
            }
        }
    }

    #[test]
    fn test_extra_copy_bounded_to_one() {
        let inds = with_fitness(&[1.999]);
        let mut rng = create_rng(1);
        for _ in 0..200 {
            let pool = MatingPool::build(&inds, DegeneratePolicy::Fail, &mut rng).unwrap();
            assert!(pool.len() == 1 || pool.len() == 2);
        }
    }

    #[test]
    fn test_sample_draws_from_pool() {
        let inds = with_fitness(&[0.0, 2.0, 0.0]);
        let mut rng = create_rng(7);
        let pool = MatingPool::build(&inds, DegeneratePolicy::Fail, &mut rng).unwrap();
        for _ in 0..100 {
            assert!(std::ptr::eq(pool.sample(&mut rng), &inds[1]));
        }
    }

    #[test]
    fn test_empty_pool_fails() {
        let inds = with_fitness(&[0.0, 0.0]);
        let mut rng = create_rng(7);
        assert!(matches!(
            MatingPool::build(&inds, DegeneratePolicy::Fail, &mut rng),
            Err(GaError::EmptyMatingPool)
        ));
    }

    #[test]
    fn test_empty_pool_uniform_fallback() {
        let inds = with_fitness(&[0.0, 0.0, 0.0]);
        let mut rng = create_rng(7);
        let pool = MatingPool::build(&inds, DegeneratePolicy::Uniform, &mut rng).unwrap();
        assert_eq!(pool.len(), 3);
        assert!((0..3).all(|i| pool.copies_of(i) == 1));
    }
}
