//! Error types for the genetic operators

use noughts_nn::NetworkError;

#[derive(Debug, thiserror::Error)]
pub enum GeneticError {
    #[error("total population fitness {total} leaves no range to select from")]
    DegenerateFitness { total: f64 },

    #[error("population has {actual} individuals, configured for {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Network(#[from] NetworkError),
}
