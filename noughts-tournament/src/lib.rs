//! Noughts Tournament - Training through self-play
//!
//! This crate provides the training loop:
//! - Round-robin play within a generation (optionally on the rayon pool)
//! - Hall of fame of past champions and the gauntlet against it
//! - Per-generation summaries
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Trainer::train (orchestration)
//! - Level 2: run_generation, round_robin, play_hall_of_fame (phases)
//! - Level 3: pairings and fitness credit (steps)
//! - Level 4: configuration, summaries, RNG creation

mod config;
mod error;
mod hall_of_fame;
mod round_robin;
mod summary;
mod trainer;

pub use config::{TrainingConfig, MIN_POPULATION};
pub use error::TrainingError;
pub use hall_of_fame::{play_hall_of_fame, HallOfFame};
pub use round_robin::round_robin;
pub use summary::{FitnessEntry, GenerationSummary};
pub use trainer::{create_rng, Trainer, TrainingReport};
