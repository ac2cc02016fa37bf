//! Tabular Q-learning trained by self-play
//!
//! The agent keeps one action-value row per canonical state id (see
//! [`crate::tictactoe::encoding`]) and improves it with one-step temporal
//! difference updates:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ best_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! Scores are from X's point of view, so `best` is the maximum when X moves
//! in `s'` and the minimum when O does.
//!
//! ## Usage Example
//!
//! ```
//! use noughts::{
//!     q_learning::{AgentConfig, QLearningAgent, TrainingParams},
//!     tictactoe::GameState,
//! };
//!
//! let mut agent = QLearningAgent::new(AgentConfig::default().with_seed(7)).unwrap();
//! let params = TrainingParams::new(
//!     0.5,  // learning_rate
//!     0.95, // discount_factor
//!     0.2,  // epsilon (exploration)
//! );
//! let report = agent.train(100, &params).unwrap();
//! assert_eq!(report.episodes_run, 100);
//!
//! let opening = agent.best_move(&GameState::new()).unwrap();
//! assert!(opening.in_bounds());
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

// Public re-exports
pub use agent::{QLearningAgent, TrainingReport};
pub use config::{AgentConfig, QInit, RewardSchedule, TrainingParams};
pub use q_table::{QTable, Transition};
