//! Fitness-proportionate parent selection
//!
//! The threshold is drawn from the integer range `[0, floor(total) - 1]` and
//! the running sum is compared with `>=`, walking from the fittest end. With
//! the threshold at 0 the fittest individual always wins, so it is picked a
//! little more often than its share of the total.

use noughts_core::PlayerContainer;
use rand::Rng;

use crate::error::GeneticError;

/// Select a parent, returning its index in `population`.
///
/// `population` must be sorted ascending by fitness. Returns
/// [`GeneticError::DegenerateFitness`] when the total fitness floors to zero,
/// since no threshold can be drawn.
pub fn pick_parent<P, R: Rng + ?Sized>(
    population: &[PlayerContainer<P>],
    rng: &mut R,
) -> Result<usize, GeneticError> {
    let total: f64 = population.iter().map(|c| c.fitness()).sum();
    if !(total >= 1.0) {
        return Err(GeneticError::DegenerateFitness { total });
    }

    let threshold = rng.gen_range(0..total.floor() as u64) as f64;

    let mut sum = 0.0;
    for (i, container) in population.iter().enumerate().rev() {
        sum += container.fitness();
        if sum >= threshold {
            return Ok(i);
        }
    }

    // Only reachable through rounding; fall back to the fittest
    Ok(population.len() - 1)
}
