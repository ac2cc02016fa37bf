//! Training observers
//!
//! Observers collect data during self-play training without coupling the
//! training loop to a terminal, a metrics sink or a signal handler.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::TrainingObserver,
    tictactoe::{GameOutcome, Player},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: GameOutcome,
        _moves: usize,
        _epsilon: f64,
    ) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, _episodes_run: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks self-play outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    episodes: usize,
    total_moves: usize,
    last_epsilon: Option<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Episodes observed so far
    pub fn total_episodes(&self) -> usize {
        self.episodes
    }

    fn per_episode(&self, count: usize) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            count as f64 / self.episodes as f64
        }
    }

    /// Get average episode length in moves
    pub fn avg_game_length(&self) -> f64 {
        self.per_episode(self.total_moves)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.per_episode(self.x_wins),
            o_win_rate: self.per_episode(self.o_wins),
            draw_rate: self.per_episode(self.draws),
            avg_game_length: self.avg_game_length(),
            last_epsilon: self.last_epsilon,
        }
    }
}

/// Summary of self-play metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
    /// Exploration rate of the most recent episode
    pub last_epsilon: Option<f64>,
}

impl TrainingObserver for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: GameOutcome,
        moves: usize,
        epsilon: f64,
    ) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.episodes += 1;
        self.total_moves += moves;
        self.last_epsilon = Some(epsilon);
        Ok(())
    }
}

/// Cancellation observer backed by a shared flag
///
/// Clone the handle from [`CancelObserver::flag`] into another thread (or a
/// signal handler) and set it to stop training after the current episode.
#[derive(Debug, Clone, Default)]
pub struct CancelObserver {
    flag: Arc<AtomicBool>,
}

impl CancelObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer that watches an existing flag
    pub fn with_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl TrainingObserver for CancelObserver {
    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
