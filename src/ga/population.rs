//! Fixed-size population.

use super::types::{sort_key, Gene, Individual};
use crate::catalogue::Catalogue;
use crate::error::GaError;
use rand::Rng;

/// An ordered collection of exactly `size` individuals.
///
/// The size is checked whenever a population is assembled, so a value of
/// this type always holds the configured number of individuals. Order
/// carries no meaning beyond tie-breaking in [`best`](Population::best).
#[derive(Debug, Clone)]
pub struct Population<G: Gene> {
    individuals: Vec<Individual<G>>,
}

impl<G: Gene> Population<G> {
    /// Creates `size` random individuals.
    pub fn random<R: Rng>(catalogue: &Catalogue, size: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(catalogue, rng))
            .collect();
        Self { individuals }
    }

    /// Assembles a population, failing unless exactly `size` individuals
    /// are supplied.
    pub fn from_individuals(individuals: Vec<Individual<G>>, size: usize) -> Result<Self, GaError> {
        if individuals.len() != size {
            return Err(GaError::PopulationSize {
                expected: size,
                found: individuals.len(),
            });
        }
        Ok(Self { individuals })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Individual<G>] {
        &self.individuals
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual<G>> {
        self.individuals.iter_mut()
    }

    pub(crate) fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    /// Individual with the highest score; ties go to the earliest one.
    ///
    /// Returns `None` only for an empty population.
    pub fn best(&self) -> Option<&Individual<G>> {
        let mut best: Option<&Individual<G>> = None;
        for ind in &self.individuals {
            match best {
                Some(current) if sort_key(ind.score()) <= sort_key(current.score()) => {}
                _ => best = Some(ind),
            }
        }
        best
    }
}

impl<'a, G: Gene> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
