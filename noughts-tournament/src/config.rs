//! Configuration types for training runs
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Smallest population that still has an opponent for everyone
pub const MIN_POPULATION: usize = 2;

/// Training run configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Generations to run
    pub iterations: usize,
    /// Hidden layer widths between the 9 inputs and 9 outputs
    pub hidden_layers: Vec<usize>,
    /// Per-weight mutation probability
    pub mutation_rate: f64,
    /// Fraction of each generation kept unchanged
    pub greedy_percent: f64,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Whether to play round-robin games in parallel
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            iterations: 100,
            hidden_layers: vec![9],
            mutation_rate: 0.03,
            greedy_percent: 0.1,
            seed: None,
            parallel: false,
        }
    }
}

impl TrainingConfig {
    /// Create config with the given population size and generation count
    pub fn new(population_size: usize, iterations: usize) -> Self {
        Self {
            population_size,
            iterations,
            ..Default::default()
        }
    }

    /// Set hidden layer widths
    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    /// Set mutation rate and elite fraction
    pub fn with_rates(mut self, mutation_rate: f64, greedy_percent: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self.greedy_percent = greedy_percent;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel round-robin play
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Copy with every out-of-range value clamped to the nearest valid one
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if config.population_size < MIN_POPULATION {
            tracing::warn!(
                "Population size {} too small, using {}",
                config.population_size,
                MIN_POPULATION
            );
            config.population_size = MIN_POPULATION;
        }
        if config.iterations < 1 {
            tracing::warn!("Iterations must be at least 1, using 1");
            config.iterations = 1;
        }
        for (i, width) in config.hidden_layers.iter_mut().enumerate() {
            if *width < 1 {
                tracing::warn!("Hidden layer {} has width 0, using 1", i + 1);
                *width = 1;
            }
        }
        if !(0.0..=1.0).contains(&config.mutation_rate) {
            tracing::warn!("Mutation rate {} outside [0, 1], clamping", config.mutation_rate);
            config.mutation_rate = config.mutation_rate.clamp(0.0, 1.0);
        }
        if !(0.0..=1.0).contains(&config.greedy_percent) {
            tracing::warn!("Greedy percent {} outside [0, 1], clamping", config.greedy_percent);
            config.greedy_percent = config.greedy_percent.clamp(0.0, 1.0);
        }

        config
    }
}
