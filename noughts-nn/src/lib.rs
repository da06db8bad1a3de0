//! Noughts NN - Dense feed-forward networks for evolved players
//!
//! This crate provides the network side of the system:
//! - Weight matrices (one per layer transition, bias column included)
//! - Deterministic forward propagation
//! - Atomic weight replacement for genetic operators
//! - JSON persistence of a network's weights

pub mod error;
pub mod network;

pub use error::NetworkError;
pub use network::{NeuralNetwork, WeightMatrix};
