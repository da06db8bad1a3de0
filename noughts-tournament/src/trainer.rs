//! Generational training loop
//!
//! Level 1 - Orchestration

use std::time::Instant;

use noughts_core::{compare_fitness, NeuralAgent, PlayerContainer};
use noughts_evolve::{GeneticAlgorithm, GeneticConfig};
use noughts_nn::NeuralNetwork;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TrainingConfig;
use crate::error::TrainingError;
use crate::hall_of_fame::{play_hall_of_fame, HallOfFame};
use crate::round_robin::round_robin;
use crate::summary::GenerationSummary;

/// Everything a finished run produced
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub summaries: Vec<GenerationSummary>,
    /// Latest hall-of-fame entry
    pub best: NeuralNetwork,
}

/// Owns the population and evolves it one generation at a time
pub struct Trainer {
    config: TrainingConfig,
    population: Vec<PlayerContainer<NeuralAgent>>,
    hall_of_fame: HallOfFame<NeuralAgent>,
    ga: GeneticAlgorithm,
    generation: usize,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

impl Trainer {
    /// Build a random population from a sanitized copy of `config`
    pub fn new(config: TrainingConfig) -> Result<Self, TrainingError> {
        let config = config.sanitized();
        let mut rng = create_rng(config.seed);

        let population = (0..config.population_size)
            .map(|index| {
                NeuralAgent::random(&config.hidden_layers, &mut rng)
                    .map(|agent| PlayerContainer::new(agent, index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ga = GeneticAlgorithm::new(
            GeneticConfig::new(config.mutation_rate, config.greedy_percent, config.population_size),
            ChaCha8Rng::seed_from_u64(rng.gen()),
        );

        tracing::info!(
            "Population of {} networks with hidden layers {:?}",
            config.population_size,
            config.hidden_layers
        );

        Ok(Self {
            config,
            population,
            hall_of_fame: HallOfFame::new(),
            ga,
            generation: 0,
        })
    }

    /// Run every configured generation, calling `on_generation` after each
    pub fn train<F>(&mut self, mut on_generation: F) -> Result<TrainingReport, TrainingError>
    where
        F: FnMut(&GenerationSummary),
    {
        let mut summaries = Vec::with_capacity(self.config.iterations);
        for _ in 0..self.config.iterations {
            let summary = self.run_generation()?;
            on_generation(&summary);
            summaries.push(summary);
        }

        let best = self.best().ok_or(TrainingError::NoChampion)?.clone();
        Ok(TrainingReport { summaries, best })
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Play, rank, record and breed one generation
    pub fn run_generation(&mut self) -> Result<GenerationSummary, TrainingError> {
        let start = Instant::now();
        round_robin(&mut self.population, self.config.parallel);
        tracing::debug!(
            "Generation {} round-robin took {:.2?}",
            self.generation,
            start.elapsed()
        );

        self.population.sort_by(compare_fitness);

        let best = self.population.last_mut().ok_or(TrainingError::NoChampion)?;
        self.hall_of_fame.record(best);
        tracing::debug!("Generation {} champion [i={}]:\n{}", self.generation, best.index, best.player.network());
        let hall_of_fame_percent = play_hall_of_fame(best, &self.hall_of_fame);

        let summary = GenerationSummary::from_sorted(self.generation, &self.population, hall_of_fame_percent)
            .ok_or(TrainingError::NoChampion)?;
        tracing::info!("{}", summary);

        self.ga.breed(&mut self.population)?;
        self.ga.mutate(&mut self.population)?;
        for container in &mut self.population {
            container.reset_fitness();
        }

        self.generation += 1;
        Ok(summary)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn population(&self) -> &[PlayerContainer<NeuralAgent>] {
        &self.population
    }

    pub fn hall_of_fame(&self) -> &HallOfFame<NeuralAgent> {
        &self.hall_of_fame
    }

    /// Network of the most recent generation's champion
    pub fn best(&self) -> Option<&NeuralNetwork> {
        self.hall_of_fame.latest().map(|c| c.player.network())
    }

    /// Generations completed so far
    pub fn generation(&self) -> usize {
        self.generation
    }
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
