//! Observer port - abstraction for watching Q-learning training
//!
//! Observers receive training events without coupling the training loop to
//! progress bars, metrics or logging sinks.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(...)` - after every self-play episode
/// 3. `should_stop()` - polled between episodes
/// 4. `on_training_end(episodes_run)` - once at the end, also after an early stop
///
/// # Examples
///
/// ```
/// use noughts::{ports::TrainingObserver, tictactoe::GameOutcome};
///
/// struct StopAfter {
///     limit: usize,
///     seen: usize,
/// }
///
/// impl TrainingObserver for StopAfter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _outcome: GameOutcome,
///         _moves: usize,
///         _epsilon: f64,
///     ) -> noughts::Result<()> {
///         self.seen += 1;
///         Ok(())
///     }
///
///     fn should_stop(&self) -> bool {
///         self.seen >= self.limit
///     }
/// }
/// ```
pub trait TrainingObserver: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode completes.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the episode (0-based)
    /// * `outcome` - How the self-play game ended
    /// * `moves` - Number of moves played in the episode
    /// * `epsilon` - Exploration rate used for the episode
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: GameOutcome,
        _moves: usize,
        _epsilon: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Cooperative cancellation check, polled between episodes.
    fn should_stop(&self) -> bool {
        false
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self, _episodes_run: usize) -> Result<()> {
        Ok(())
    }
}
