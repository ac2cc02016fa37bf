//! Game drivers, baseline opponents and training observers
//!
//! This module provides:
//! - A driver loop that plays any two [`Strategy`] implementations
//! - Repeated-trial evaluation of one strategy against another
//! - A uniformly random baseline opponent
//! - Observers that watch Q-learning training

pub mod baseline;
pub mod evaluation;
pub mod observers;

pub use baseline::RandomPlayer;
pub use evaluation::{EvaluationResult, evaluate, play_from, play_game};
pub use observers::{CancelObserver, MetricsObserver, MetricsSummary, ProgressObserver};

pub use crate::ports::{Strategy, TrainingObserver};
