//! Shared configuration types for CLI commands

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    minimax::MinimaxEngine,
    pipeline::RandomPlayer,
    ports::Strategy,
    q_learning::{AgentConfig, QLearningAgent, TrainingParams},
};

/// Which strategy controls a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Exact minimax search
    Minimax,
    /// Uniformly random legal moves
    Random,
    /// Greedy Q-learning agent, trained by self-play first
    Q,
}

/// Settings used when a command has to build a Q-learning agent on the fly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTrainingConfig {
    /// Self-play episodes before the agent plays
    pub episodes: usize,

    /// Learning parameters
    pub params: TrainingParams,
}

impl Default for QTrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 20_000,
            params: TrainingParams::default().with_decay(0.9995, 0.01),
        }
    }
}

/// Build a boxed strategy for `kind`.
///
/// `seed` seeds the random player and the Q-learning agent.
pub fn build_strategy(
    kind: StrategyKind,
    seed: Option<u64>,
    q_training: &QTrainingConfig,
) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match kind {
        StrategyKind::Minimax => Box::new(MinimaxEngine::new()),
        StrategyKind::Random => Box::new(match seed {
            Some(seed) => RandomPlayer::seeded("Random", seed),
            None => RandomPlayer::new("Random"),
        }),
        StrategyKind::Q => {
            let mut config = AgentConfig::default();
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let mut agent = QLearningAgent::new(config)?;
            agent
                .train(q_training.episodes, &q_training.params)
                .context("Failed to train Q-learning agent")?;
            Box::new(agent)
        }
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GameState;

    #[test]
    fn test_build_strategy_names() {
        let q_training = QTrainingConfig {
            episodes: 10,
            ..QTrainingConfig::default()
        };
        let minimax = build_strategy(StrategyKind::Minimax, None, &q_training).unwrap();
        let random = build_strategy(StrategyKind::Random, Some(1), &q_training).unwrap();
        let q = build_strategy(StrategyKind::Q, Some(1), &q_training).unwrap();

        assert_eq!(minimax.name(), "Minimax");
        assert_eq!(random.name(), "Random");
        assert_eq!(q.name(), "Q-Learning");
    }

    #[test]
    fn test_built_strategies_play_legal_moves() {
        let q_training = QTrainingConfig {
            episodes: 10,
            ..QTrainingConfig::default()
        };
        let state = GameState::new();
        for kind in [StrategyKind::Minimax, StrategyKind::Random, StrategyKind::Q] {
            let mut strategy = build_strategy(kind, Some(3), &q_training).unwrap();
            let mv = strategy.select_move(&state).unwrap();
            assert!(mv.in_bounds());
        }
    }
}
