//! Tic-Tac-Toe with an exact minimax solver and a self-play Q-learning agent
//!
//! This crate provides:
//! - A validated 3×3 game state with a compact base-3 state encoding
//! - A memoized minimax engine that never loses
//! - A tabular Q-learning agent trained by self-play
//! - Game drivers, a random baseline and training observers
//! - The `noughts` command-line interface

pub mod cli;
pub mod error;
pub mod minimax;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use minimax::MinimaxEngine;
pub use q_learning::QLearningAgent;
