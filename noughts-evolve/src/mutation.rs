//! Gaussian weight mutation

use noughts_nn::WeightMatrix;
use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation of the noise added to a mutated weight
pub const MUTATION_STD_DEV: f64 = 0.1;

/// Perturb each weight with probability `mutation_rate` by N(0, 0.1).
///
/// Returns the number of weights changed.
pub fn mutate_weights<R: Rng + ?Sized>(
    weights: &mut [WeightMatrix],
    mutation_rate: f64,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for layer in weights.iter_mut() {
        for w in layer.iter_mut() {
            if rng.gen::<f64>() < mutation_rate {
                let z: f64 = rng.sample(StandardNormal);
                *w += MUTATION_STD_DEV * z;
                mutated += 1;
            }
        }
    }
    mutated
}
