//! Noughts Core - Game engine and players
//!
//! This crate provides the game side of the system:
//! - Bit-packed 3x3 board with mask-based win detection
//! - Turn loop that ranks each player's preferences and applies the best legal move
//! - Fitness credit for wins (faster is better) and ties
//! - Player capability with neural, scripted and interactive agents

pub mod board;
pub mod container;
pub mod error;
pub mod game;
pub mod player;

// Re-exports for convenient access
pub use board::{Board, Cell, Mark, CELLS, LINES, WIN_MASKS};
pub use container::{compare_fitness, PlayerContainer};
pub use error::CoreError;
pub use game::{play_game, rank_moves, win_reward, Game, GameOutcome, GameResult, TIE_REWARD};
pub use player::{ManualAgent, NeuralAgent, Perspective, Player, Preferences, ScriptedAgent};
