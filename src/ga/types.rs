//! Core representation: genes, chromosomes, and individuals.
//!
//! A chromosome holds exactly one gene per catalogue item, in catalogue
//! order. The [`Gene`] trait abstracts over the two supported encodings:
//!
//! - `bool`: the item is either packed or not (0/1 knapsack)
//! - `u32`: how many copies of the item are packed, in `[0, item.bound()]`

use crate::catalogue::{Catalogue, Item};
use rand::Rng;
use std::fmt;

/// One chromosome position.
///
/// Implementations decide how a gene is drawn at random, how it mutates,
/// and how many copies of its item it represents.
pub trait Gene: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Draws a gene uniformly from the values allowed for `item`.
    fn random<R: Rng>(item: &Item, rng: &mut R) -> Self;

    /// Returns the mutated value of this gene.
    fn mutate<R: Rng>(self, item: &Item, rng: &mut R) -> Self;

    /// Number of copies of the item this gene packs.
    fn quantity(self) -> u32;

    /// Whether this gene is a legal value for `item`.
    fn is_within(self, item: &Item) -> bool;
}

impl Gene for bool {
    fn random<R: Rng>(_item: &Item, rng: &mut R) -> Self {
        rng.random_bool(0.5)
    }

    /// Boolean mutation always flips.
    fn mutate<R: Rng>(self, _item: &Item, _rng: &mut R) -> Self {
        !self
    }

    fn quantity(self) -> u32 {
        u32::from(self)
    }

    fn is_within(self, _item: &Item) -> bool {
        true
    }
}

impl Gene for u32 {
    fn random<R: Rng>(item: &Item, rng: &mut R) -> Self {
        rng.random_range(0..=item.bound())
    }

    /// Bounded mutation redraws independently of the current value, so it
    /// may land on the same count.
    fn mutate<R: Rng>(self, item: &Item, rng: &mut R) -> Self {
        Self::random(item, rng)
    }

    fn quantity(self) -> u32 {
        self
    }

    fn is_within(self, item: &Item) -> bool {
        self <= item.bound()
    }
}

/// Summed profit and cost of a chromosome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub profit: f64,
    pub cost: f64,
}

impl Totals {
    /// Sums every gene's contribution, `quantity * item.profit` and
    /// `quantity * item.cost`.
    pub fn of<G: Gene>(chromosome: &[G], catalogue: &Catalogue) -> Self {
        let mut profit = 0.0;
        let mut cost = 0.0;
        for (gene, item) in chromosome.iter().zip(catalogue.iter()) {
            let n = f64::from(gene.quantity());
            profit += item.profit * n;
            cost += item.cost * n;
        }
        Self { profit, cost }
    }

    pub fn is_feasible(&self, capacity: f64) -> bool {
        self.cost <= capacity
    }
}

/// A candidate solution.
///
/// The chromosome is fixed once the individual exists; producing a
/// different chromosome means producing a new individual. The three
/// evaluation fields are `None` until an evaluator pass sets them:
///
/// - `raw_score`: the scoring policy's value before any population shift
/// - `score`: the value fitness is computed from (after the shift, if any)
/// - `fitness`: expected offspring count, mean 1.0 across the population
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G: Gene> {
    chromosome: Vec<G>,
    raw_score: Option<f64>,
    score: Option<f64>,
    fitness: Option<f64>,
}

impl<G: Gene> Individual<G> {
    /// Creates an individual whose genes are drawn independently and
    /// uniformly, each within its own item's bound.
    pub fn random<R: Rng>(catalogue: &Catalogue, rng: &mut R) -> Self {
        let chromosome = catalogue.iter().map(|item| G::random(item, rng)).collect();
        Self::from_chromosome(chromosome)
    }

    /// Wraps an already assembled chromosome.
    pub fn from_chromosome(chromosome: Vec<G>) -> Self {
        Self {
            chromosome,
            raw_score: None,
            score: None,
            fitness: None,
        }
    }

    pub fn chromosome(&self) -> &[G] {
        &self.chromosome
    }

    pub fn raw_score(&self) -> Option<f64> {
        self.raw_score
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub(crate) fn set_scores(&mut self, raw_score: f64) {
        self.raw_score = Some(raw_score);
        self.score = Some(raw_score);
    }

    pub(crate) fn shift_score(&mut self, shift: f64) {
        if let Some(score) = self.score.as_mut() {
            *score += shift;
        }
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// `true` if `other` is absent or this individual's raw score is
    /// strictly higher. Unevaluated individuals rank below every
    /// evaluated one.
    pub fn is_better_than(&self, other: Option<&Self>) -> bool {
        match other {
            None => true,
            Some(other) => sort_key(self.raw_score) > sort_key(other.raw_score),
        }
    }

    pub fn totals(&self, catalogue: &Catalogue) -> Totals {
        Totals::of(&self.chromosome, catalogue)
    }

    /// Per-item listing of this individual's chromosome.
    pub fn listing(&self, catalogue: &Catalogue) -> String {
        listing(&self.chromosome, catalogue)
    }
}

pub(crate) fn sort_key(score: Option<f64>) -> f64 {
    score.unwrap_or(f64::NEG_INFINITY)
}

/// Renders `<gene> <item name>` lines in catalogue order.
pub fn listing<G: Gene>(chromosome: &[G], catalogue: &Catalogue) -> String {
    chromosome
        .iter()
        .zip(catalogue.iter())
        .map(|(gene, item)| format!("{gene} {}", item.name))
        .collect::<Vec<_>>()
        .join("\n")
}
