//! Error types for network construction, weight replacement and persistence

use std::path::PathBuf;

/// Errors raised by [`crate::NeuralNetwork`]
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("expected {expected} weight layers, got {actual}")]
    LayerCountMismatch { expected: usize, actual: usize },

    #[error("layer {layer} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        layer: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed network data: {0}")]
    Format(#[from] serde_json::Error),
}
