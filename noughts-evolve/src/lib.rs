//! Noughts Evolution - Genetic algorithm over network weights
//!
//! This crate provides the evolutionary operators:
//! - Elitism (fittest fraction carried over unchanged)
//! - Selection (fitness-proportionate)
//! - Crossover (uniform, per weight)
//! - Mutation (Gaussian, per weight)

pub mod crossover;
pub mod error;
pub mod mutation;
pub mod selection;

pub use crossover::crossover_weights;
pub use error::GeneticError;
pub use mutation::{mutate_weights, MUTATION_STD_DEV};
pub use selection::pick_parent;

use noughts_core::{NeuralAgent, PlayerContainer};
use noughts_nn::{NeuralNetwork, WeightMatrix};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Genetic algorithm configuration
#[derive(Clone, Debug, PartialEq)]
pub struct GeneticConfig {
    /// Per-weight mutation probability, in [0, 1]
    pub mutation_rate: f64,
    /// Fraction of the population kept unchanged, in [0, 1]
    pub greedy_percent: f64,
    /// Size every population passed in must have
    pub population_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.03,
            greedy_percent: 0.1,
            population_size: 2,
        }
    }
}

impl GeneticConfig {
    /// Create a config, clamping both rates into [0, 1]
    pub fn new(mutation_rate: f64, greedy_percent: f64, population_size: usize) -> Self {
        Self {
            mutation_rate: mutation_rate.clamp(0.0, 1.0),
            greedy_percent: greedy_percent.clamp(0.0, 1.0),
            population_size,
        }
    }

    /// Number of elites: `max(1, floor(greedy_percent * population_size))`
    pub fn elite_count(&self) -> usize {
        ((self.greedy_percent * self.population_size as f64).floor() as usize).max(1)
    }
}

/// Breeds and mutates populations of neural agents.
///
/// Owns its random source so runs are reproducible from a seed.
pub struct GeneticAlgorithm<R = ChaCha8Rng> {
    config: GeneticConfig,
    rng: R,
}

impl<R: Rng> GeneticAlgorithm<R> {
    pub fn new(config: GeneticConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Replace `population` with the next generation.
    ///
    /// `population` must be sorted ascending by fitness. The new generation
    /// starts with the elites, fittest first; every other slot `i` is a copy of
    /// `population[N - 1 - i]` (keeping its index) carrying the crossover of
    /// two selected parents.
    pub fn breed(&mut self, population: &mut Vec<PlayerContainer<NeuralAgent>>) -> Result<(), GeneticError> {
        let n = self.check_size(population)?;
        debug_assert!(
            population.windows(2).all(|w| w[0].fitness() <= w[1].fitness()),
            "population must be sorted ascending by fitness"
        );

        let keep = self.config.elite_count();
        let mut next = Vec::with_capacity(n);
        next.extend(population.iter().rev().take(keep).cloned());

        for i in keep..n {
            let parent1 = self.pick_parent(population)?;
            let parent2 = self.pick_parent(population)?;
            let child = self.crossover(
                population[parent1].player.network(),
                population[parent2].player.network(),
            );

            let mut slot = population[n - 1 - i].clone();
            slot.player.network_mut().set_weights(child)?;
            next.push(slot);
        }

        tracing::debug!("Bred generation: {} elites, {} children", keep, n - keep);
        *population = next;
        Ok(())
    }

    /// Mutate every individual after the elites
    pub fn mutate(&mut self, population: &mut [PlayerContainer<NeuralAgent>]) -> Result<(), GeneticError> {
        self.check_size(population)?;

        let mut mutated = 0;
        for container in population.iter_mut().skip(self.config.elite_count()) {
            let network = container.player.network_mut();
            let mut weights = network.weights();
            mutated += mutate_weights(&mut weights, self.config.mutation_rate, &mut self.rng);
            network.set_weights(weights)?;
        }

        tracing::debug!("Mutated {} weights", mutated);
        Ok(())
    }

    /// Fitness-proportionate selection, see [`selection::pick_parent`]
    pub fn pick_parent<P>(&mut self, population: &[PlayerContainer<P>]) -> Result<usize, GeneticError> {
        pick_parent(population, &mut self.rng)
    }

    /// Uniform crossover with `parent1` as the structural base
    pub fn crossover(&mut self, parent1: &NeuralNetwork, parent2: &NeuralNetwork) -> Vec<WeightMatrix> {
        crossover_weights(parent1.layers(), parent2.layers(), &mut self.rng)
    }

    fn check_size<P>(&self, population: &[PlayerContainer<P>]) -> Result<usize, GeneticError> {
        if population.len() != self.config.population_size {
            return Err(GeneticError::PopulationSizeMismatch {
                expected: self.config.population_size,
                actual: population.len(),
            });
        }
        Ok(population.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sorted_population(n: usize, rng: &mut ChaCha8Rng) -> Vec<PlayerContainer<NeuralAgent>> {
        (0..n)
            .map(|i| {
                let mut c = PlayerContainer::new(NeuralAgent::random(&[6], rng).unwrap(), i);
                c.add_to_fitness((i + 1) as f64);
                c
            })
            .collect()
    }

    fn ga(mutation_rate: f64, greedy_percent: f64, n: usize, seed: u64) -> GeneticAlgorithm {
        GeneticAlgorithm::new(
            GeneticConfig::new(mutation_rate, greedy_percent, n),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_config_clamps_rates() {
        let config = GeneticConfig::new(1.5, -0.2, 10);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.greedy_percent, 0.0);
    }

    #[test]
    fn test_elite_count() {
        assert_eq!(GeneticConfig::new(0.0, 0.1, 20).elite_count(), 2);
        assert_eq!(GeneticConfig::new(0.0, 0.25, 10).elite_count(), 2);
        assert_eq!(GeneticConfig::new(0.0, 0.1, 5).elite_count(), 1);
        assert_eq!(GeneticConfig::new(0.0, 0.0, 5).elite_count(), 1);
        assert_eq!(GeneticConfig::new(0.0, 1.0, 5).elite_count(), 5);
    }

    #[test]
    fn test_breed_keeps_elites_and_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let original = sorted_population(10, &mut rng);
        let mut population = original.clone();
        let mut ga = ga(0.03, 0.2, 10, 2);

        ga.breed(&mut population).unwrap();

        assert_eq!(population.len(), 10);
        // Elites, fittest first, weights untouched
        assert_eq!(population[0].index, 9);
        assert_eq!(population[1].index, 8);
        assert_eq!(population[0].player, original[9].player);
        assert_eq!(population[1].player, original[8].player);
        // Children keep the identity of the slot they were copied from
        for i in 2..10 {
            assert_eq!(population[i].index, original[9 - i].index);
        }
        let mut indices: Vec<usize> = population.iter().map(|c| c.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_breed_keeps_at_least_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let original = sorted_population(4, &mut rng);
        let mut population = original.clone();
        let mut ga = ga(0.0, 0.0, 4, 4);

        ga.breed(&mut population).unwrap();

        assert_eq!(population.len(), 4);
        assert_eq!(population[0].player, original[3].player);
    }

    #[test]
    fn test_breed_children_mix_parent_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let original = sorted_population(6, &mut rng);
        let mut population = original.clone();
        let mut ga = ga(0.0, 0.0, 6, 6);

        ga.breed(&mut population).unwrap();

        // Every child weight comes from some member of the previous generation
        for child in &population[1..] {
            for (layer, weights) in child.player.network().layers().iter().enumerate() {
                for ((r, c), &w) in weights.indexed_iter() {
                    assert!(original
                        .iter()
                        .any(|p| p.player.network().layers()[layer][(r, c)] == w));
                }
            }
        }
    }

    #[test]
    fn test_breed_size_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut population = sorted_population(5, &mut rng);
        let mut ga = ga(0.0, 0.1, 6, 8);
        assert!(matches!(
            ga.breed(&mut population),
            Err(GeneticError::PopulationSizeMismatch { expected: 6, actual: 5 })
        ));
    }

    #[test]
    fn test_breed_zero_fitness_leaves_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut population = sorted_population(4, &mut rng);
        for c in &mut population {
            c.reset_fitness();
        }
        let before = population.clone();
        let mut ga = ga(0.0, 0.1, 4, 10);

        assert!(matches!(
            ga.breed(&mut population),
            Err(GeneticError::DegenerateFitness { .. })
        ));
        assert_eq!(population.len(), before.len());
        for (a, b) in population.iter().zip(&before) {
            assert_eq!(a.player, b.player);
        }
    }

    #[test]
    fn test_mutate_zero_rate_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let original = sorted_population(8, &mut rng);
        let mut population = original.clone();
        let mut ga = ga(0.0, 0.25, 8, 12);

        ga.mutate(&mut population).unwrap();

        for (a, b) in population.iter().zip(&original) {
            assert_eq!(a.player, b.player);
        }
    }

    #[test]
    fn test_mutate_full_rate_spares_elites_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let original = sorted_population(8, &mut rng);
        let mut population = original.clone();
        let mut ga = ga(1.0, 0.25, 8, 14);

        ga.mutate(&mut population).unwrap();

        let keep = ga.config().elite_count();
        assert_eq!(keep, 2);
        for (i, (a, b)) in population.iter().zip(&original).enumerate() {
            let after = a.player.network().layers();
            let before = b.player.network().layers();
            if i < keep {
                assert_eq!(after, before);
            } else {
                for (x, y) in after.iter().zip(before) {
                    assert!(x.iter().zip(y.iter()).all(|(p, q)| p != q));
                }
            }
        }
    }
}
