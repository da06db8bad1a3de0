//! Uniform crossover of weight sequences

use noughts_nn::WeightMatrix;
use ndarray::Zip;
use rand::Rng;

/// Combine two parents' weights element by element.
///
/// Every element takes parent 2's value on a fair coin flip and otherwise keeps
/// parent 1's. Parent 1 provides the structure, so both parents must share the
/// same topology.
///
/// # Panics
/// Panics if the parents' layer counts or shapes differ.
pub fn crossover_weights<R: Rng + ?Sized>(
    parent1: &[WeightMatrix],
    parent2: &[WeightMatrix],
    rng: &mut R,
) -> Vec<WeightMatrix> {
    assert_eq!(parent1.len(), parent2.len(), "Parents must have the same layer count");

    parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| {
            let mut child = a.clone();
            Zip::from(&mut child).and(b).for_each(|c, &other| {
                if rng.gen_bool(0.5) {
                    *c = other;
                }
            });
            child
        })
        .collect()
}
