//! CLI infrastructure for the noughts toolkit
//!
//! This module provides the command-line interface for training a
//! Q-learning agent, solving positions with minimax and watching automated
//! games.

pub mod commands;
pub mod config;
pub mod output;
