//! Error types for training runs

use noughts_core::CoreError;
use noughts_evolve::GeneticError;

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("failed to create population: {0}")]
    Population(#[from] CoreError),

    #[error("breeding failed: {0}")]
    Genetic(#[from] GeneticError),

    #[error("no generation has been played yet")]
    NoChampion,
}
