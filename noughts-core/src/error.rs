//! Error types for the game engine and its players

use noughts_nn::NetworkError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("agent networks must map 9 inputs to 9 outputs, got {inputs} -> {outputs}")]
    IncompatibleNetwork { inputs: usize, outputs: usize },

    #[error(transparent)]
    Network(#[from] NetworkError),
}
