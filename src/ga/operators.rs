//! Two-point crossover and per-gene mutation.
//!
//! Both operators work on plain gene slices and are generic over [`Gene`],
//! so the same code serves boolean and bounded chromosomes.
//!
//! # Crossover
//!
//! [`two_point_crossover`] draws two cut points `p1 <= p2` and builds
//! `parent1[..p1] ++ parent2[p1..=p2] ++ parent1[p2 + 1..]`.
//!
//! # Mutation
//!
//! [`mutate`] visits every gene and, with probability `rate`, replaces it
//! with [`Gene::mutate`].

use super::types::{Gene, Individual};
use crate::catalogue::Catalogue;
use crate::error::GaError;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Two-point crossover producing a single child chromosome.
///
/// The middle segment, both cut points included, comes from `parent2`;
/// the outer segments come from `parent1`. Genes are copied, so the child
/// shares no storage with either parent.
///
/// # Errors
/// [`GaError::ChromosomeLength`] if either parent's length differs from
/// `len`, or if `len` is zero.
pub fn two_point_crossover<G: Gene, R: Rng>(
    parent1: &[G],
    parent2: &[G],
    len: usize,
    rng: &mut R,
) -> Result<Vec<G>, GaError> {
    check_length(parent1, len)?;
    check_length(parent2, len)?;
    if len == 0 {
        return Err(GaError::ChromosomeLength {
            expected: 1,
            found: 0,
        });
    }
    let (point1, point2) = cut_points(len, rng);
    Ok(assemble(parent1, parent2, point1, point2))
}

/// Builds the child for fixed cut points `point1 <= point2 < len`.
pub fn assemble<G: Gene>(parent1: &[G], parent2: &[G], point1: usize, point2: usize) -> Vec<G> {
    debug_assert!(point1 <= point2 && point2 < parent1.len());
    let mut child = Vec::with_capacity(parent1.len());
    child.extend_from_slice(&parent1[..point1]);
    child.extend_from_slice(&parent2[point1..=point2]);
    child.extend_from_slice(&parent1[point2 + 1..]);
    child
}

/// Two independent uniform cut points in `0..len`, ordered.
fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..len);
    let b = rng.random_range(0..len);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn check_length<G>(chromosome: &[G], expected: usize) -> Result<(), GaError> {
    if chromosome.len() != expected {
        return Err(GaError::ChromosomeLength {
            expected,
            found: chromosome.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutates `chromosome` in place, gene by gene.
///
/// Each position is independently selected with probability `rate`.
/// Boolean genes flip; bounded genes are redrawn within their item's bound.
pub fn mutate<G: Gene, R: Rng>(chromosome: &mut [G], catalogue: &Catalogue, rate: f64, rng: &mut R) {
    for (gene, item) in chromosome.iter_mut().zip(catalogue.iter()) {
        if rng.random::<f64>() < rate {
            *gene = gene.mutate(item, rng);
        }
    }
}

// ============================================================================
// Reproduction
// ============================================================================

/// Produces offspring: two-point crossover followed by mutation.
#[derive(Debug, Clone, Copy)]
pub struct Crossover<'a> {
    catalogue: &'a Catalogue,
    mutation_rate: f64,
}

impl<'a> Crossover<'a> {
    pub fn new(catalogue: &'a Catalogue, mutation_rate: f64) -> Self {
        Self {
            catalogue,
            mutation_rate,
        }
    }

    /// Crosses two parents, mutates the child, and wraps it in a fresh,
    /// unevaluated individual.
    pub fn two_point<G: Gene, R: Rng>(
        &self,
        parent1: &Individual<G>,
        parent2: &Individual<G>,
        rng: &mut R,
    ) -> Result<Individual<G>, GaError> {
        let mut child = two_point_crossover(
            parent1.chromosome(),
            parent2.chromosome(),
            self.catalogue.len(),
            rng,
        )?;
        mutate(&mut child, self.catalogue, self.mutation_rate, rng);
        Ok(Individual::from_chromosome(child))
    }
}

// ============================================================================
// Tests
// ============================================================================
