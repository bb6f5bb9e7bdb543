//! Reporting sink for the evolutionary loop.
//!
//! The runner never prints; it hands every generation's statistics and
//! the final best individual to a [`GenerationObserver`]. [`TextReport`]
//! renders them as plain text lines.

use super::runner::GenerationStats;
use super::types::{Gene, Individual};
use crate::catalogue::Catalogue;
use crate::error::GaError;
use std::io::Write;

/// Receives progress from [`GeneticAlgorithm`](super::GeneticAlgorithm).
///
/// Both hooks default to doing nothing.
pub trait GenerationObserver<G: Gene> {
    /// Called once per generation, after the best-ever individual has been
    /// updated.
    fn on_generation(
        &mut self,
        _stats: &GenerationStats,
        _best_ever: &Individual<G>,
        _catalogue: &Catalogue,
    ) -> Result<(), GaError> {
        Ok(())
    }

    /// Called once after the last generation.
    fn on_finish(&mut self, _best_ever: &Individual<G>, _catalogue: &Catalogue) -> Result<(), GaError> {
        Ok(())
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<G: Gene> GenerationObserver<G> for NoopObserver {}

/// Writes a line per generation and a final best-ever block.
///
/// ```text
/// VALID     Gen: 3 Profit: 16 Cost: 30
/// <invalid> Gen: 4 Profit: 22 Cost: 50
/// ```
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<G: Gene, W: Write> GenerationObserver<G> for TextReport<W> {
    fn on_generation(
        &mut self,
        stats: &GenerationStats,
        _best_ever: &Individual<G>,
        _catalogue: &Catalogue,
    ) -> Result<(), GaError> {
        let tag = if stats.best_ever_feasible {
            "VALID    "
        } else {
            "<invalid>"
        };
        writeln!(
            self.out,
            "{tag} Gen: {} Profit: {} Cost: {}",
            stats.generation, stats.best_ever_profit, stats.best_ever_cost
        )?;
        Ok(())
    }

    fn on_finish(&mut self, best_ever: &Individual<G>, catalogue: &Catalogue) -> Result<(), GaError> {
        let totals = best_ever.totals(catalogue);
        writeln!(self.out, "----------------------")?;
        writeln!(self.out, "Best ever")?;
        writeln!(self.out, "----------------------")?;
        writeln!(self.out, "Profit: {}", totals.profit)?;
        writeln!(self.out, "Cost:   {}", totals.cost)?;
        writeln!(self.out, "Listing:")?;
        writeln!(self.out, "{}", best_ever.listing(catalogue))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Item;

    fn stats(generation: usize, feasible: bool) -> GenerationStats {
        GenerationStats {
            generation,
            population_best_score: 16.0,
            mean_score: 8.0,
            best_ever_score: 16.0,
            best_ever_profit: 16.0,
            best_ever_cost: if feasible { 30.0 } else { 50.0 },
            best_ever_feasible: feasible,
            shift: 0.0,
        }
    }

    #[test]
    fn test_generation_lines() {
        let catalogue = Catalogue::new(vec![Item::new("a", 10.0, 6.0)]).unwrap();
        let best = Individual::from_chromosome(vec![true]);
        let mut report = TextReport::new(Vec::new());
        report.on_generation(&stats(0, true), &best, &catalogue).unwrap();
        report.on_generation(&stats(1, false), &best, &catalogue).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(
            text,
            "VALID     Gen: 0 Profit: 16 Cost: 30\n<invalid> Gen: 1 Profit: 16 Cost: 50\n"
        );
    }

    #[test]
    fn test_final_block() {
        let catalogue = Catalogue::new(vec![
            Item::bounded("ACCOR", 32.0, 9.0, 60),
            Item::bounded("AXA", 18.0, 2.0, 65),
        ])
        .unwrap();
        let best = Individual::from_chromosome(vec![2u32, 0]);
        let mut report = TextReport::new(Vec::new());
        GenerationObserver::on_finish(&mut report, &best, &catalogue).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(
            text,
            "----------------------\nBest ever\n----------------------\n\
             Profit: 18\nCost:   64\nListing:\n2 ACCOR\n0 AXA\n"
        );
    }
}
