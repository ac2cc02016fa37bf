//! Configuration types for Q-learning agents and training runs.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{GameOutcome, GameState, Player},
};

/// How the Q-table is filled before training
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QInit {
    /// Every entry starts at 0.0
    #[default]
    Zero,
    /// Every entry is drawn uniformly from `[0, scale)`
    Uniform { scale: f64 },
}

/// Immediate rewards, always from X's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub x_win: f64,
    pub o_win: f64,
    pub draw: f64,
    /// Charged for every move that does not end the game
    pub step: f64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            x_win: 1.0,
            o_win: -1.0,
            draw: 0.5,
            step: -0.01,
        }
    }
}

impl RewardSchedule {
    /// Reward for arriving in `state`
    pub fn reward(&self, state: &GameState) -> f64 {
        match GameOutcome::of(state) {
            Some(GameOutcome::Win(Player::X)) => self.x_win,
            Some(GameOutcome::Win(Player::O)) => self.o_win,
            Some(GameOutcome::Draw) => self.draw,
            None => self.step,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("x_win", self.x_win),
            ("o_win", self.o_win),
            ("draw", self.draw),
            ("step", self.step),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("reward '{name}' must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use noughts::q_learning::{AgentConfig, QInit};
///
/// let config = AgentConfig::default()
///     .with_seed(42)
///     .with_init(QInit::Uniform { scale: 0.01 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Initial Q-table contents
    pub init: QInit,
    /// Reward schedule used during training
    pub rewards: RewardSchedule,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Set the Q-table initialisation.
    pub fn with_init(mut self, init: QInit) -> Self {
        self.init = init;
        self
    }

    /// Set the reward schedule.
    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for non-finite rewards or a
    /// negative or non-finite random init scale.
    pub fn validate(&self) -> Result<()> {
        if let QInit::Uniform { scale } = self.init
            && (!scale.is_finite() || scale < 0.0)
        {
            return Err(Error::InvalidConfiguration {
                message: format!("init scale must be finite and >= 0, got {scale}"),
            });
        }
        self.rewards.validate()
    }
}

/// Hyperparameters of one training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration probability ε for the first episode
    pub epsilon: f64,
    /// Multiplicative decay applied to ε after every episode (1.0 keeps ε fixed)
    pub epsilon_decay: f64,
    /// Floor for the decayed ε
    pub min_epsilon: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.95,
            epsilon: 0.2,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
        }
    }
}

impl TrainingParams {
    /// Parameters with a fixed exploration rate
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
            ..Self::default()
        }
    }

    /// Anneal ε multiplicatively per episode down to `min_epsilon`.
    pub fn with_decay(mut self, epsilon_decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self.min_epsilon = min_epsilon;
        self
    }

    /// ε to use for the episode after one that used `epsilon`
    pub fn decay(&self, epsilon: f64) -> f64 {
        (epsilon * self.epsilon_decay).max(self.min_epsilon)
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                })
            }
        };

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning_rate must be within (0, 1], got {}",
                    self.learning_rate
                ),
            });
        }
        unit("discount_factor", self.discount_factor)?;
        unit("epsilon", self.epsilon)?;
        unit("epsilon_decay", self.epsilon_decay)?;
        unit("min_epsilon", self.min_epsilon)
    }
}
