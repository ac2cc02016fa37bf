//! Self-play Q-learning agent
//!
//! One Q-table serves both sides. Every move of a self-play episode, X's and
//! O's alike, produces one transition and one update, with rewards expressed
//! from X's point of view. X acts on the highest score and O on the lowest, and
//! the bootstrap follows whoever moves in the next state.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    Error, Result,
    ports::{Strategy, TrainingObserver},
    q_learning::{
        config::{AgentConfig, QInit, TrainingParams},
        q_table::{QTable, Transition},
    },
    tictactoe::{ACTION_COUNT, GameOutcome, GameState, Move, Player, StateId, encoding},
};

/// Episodes between debug progress events
const LOG_EVERY: usize = 1000;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Summary of one call to [`QLearningAgent::train`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub episodes_requested: usize,
    pub episodes_run: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Number of Q-table updates applied
    pub updates: usize,
    /// ε after the last decay step
    pub final_epsilon: f64,
    /// Whether an observer stopped training before all episodes ran
    pub cancelled: bool,
}

/// Tabular Q-learning agent (off-policy TD control)
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    config: AgentConfig,
    q_table: QTable,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an untrained agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config does not validate.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = build_rng(config.seed);
        let q_table = match config.init {
            QInit::Zero => QTable::zeros(),
            QInit::Uniform { scale } => QTable::uniform(scale, &mut rng),
        };
        Ok(Self {
            name: "Q-Learning".to_string(),
            config,
            q_table,
            rng,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// The nine action scores for `state`, indexed by `row * 3 + col`
    pub fn q_values(&self, state: &GameState) -> &[f64; ACTION_COUNT] {
        self.q_table.row(encoding::encode(state))
    }

    /// Train by self-play for `episodes` episodes.
    ///
    /// `episodes == 0` is a no-op that leaves the Q-table untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `params` does not validate
    /// and there is at least one episode to run.
    pub fn train(&mut self, episodes: usize, params: &TrainingParams) -> Result<TrainingReport> {
        self.train_observed(episodes, params, &mut [])
    }

    /// Train by self-play, reporting to `observers` after every episode.
    ///
    /// Training stops early, between episodes, once any observer's
    /// [`TrainingObserver::should_stop`] returns true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `params` does not validate,
    /// or the first error an observer returns.
    #[instrument(level = "info", skip(self, params, observers), fields(agent = %self.name))]
    pub fn train_observed(
        &mut self,
        episodes: usize,
        params: &TrainingParams,
        observers: &mut [&mut dyn TrainingObserver],
    ) -> Result<TrainingReport> {
        let mut report = TrainingReport {
            episodes_requested: episodes,
            final_epsilon: params.epsilon,
            ..TrainingReport::default()
        };
        if episodes == 0 {
            return Ok(report);
        }
        params.validate()?;

        info!(
            episodes,
            alpha = params.learning_rate,
            gamma = params.discount_factor,
            epsilon = params.epsilon,
            "starting self-play training"
        );

        for observer in observers.iter_mut() {
            observer.on_training_start(episodes)?;
        }

        let mut epsilon = params.epsilon;
        let mut state = GameState::new();

        for episode in 0..episodes {
            if observers.iter().any(|observer| observer.should_stop()) {
                info!(episode, "training cancelled by observer");
                report.cancelled = true;
                break;
            }

            let moves = self.run_episode(&mut state, epsilon, params, &mut report)?;
            let outcome = match state.winner() {
                Some(winner) => GameOutcome::Win(winner),
                None => GameOutcome::Draw,
            };
            match outcome {
                GameOutcome::Win(Player::X) => report.x_wins += 1,
                GameOutcome::Win(Player::O) => report.o_wins += 1,
                GameOutcome::Draw => report.draws += 1,
            }
            report.episodes_run += 1;

            for observer in observers.iter_mut() {
                observer.on_episode_end(episode, outcome, moves, epsilon)?;
            }

            if (episode + 1) % LOG_EVERY == 0 {
                debug!(
                    episode = episode + 1,
                    epsilon,
                    x_wins = report.x_wins,
                    o_wins = report.o_wins,
                    draws = report.draws,
                    "training progress"
                );
            }

            epsilon = params.decay(epsilon);
            report.final_epsilon = epsilon;
            state.reset();
        }

        for observer in observers.iter_mut() {
            observer.on_training_end(report.episodes_run)?;
        }

        info!(
            episodes_run = report.episodes_run,
            x_wins = report.x_wins,
            o_wins = report.o_wins,
            draws = report.draws,
            "training finished"
        );
        Ok(report)
    }

    /// Play one self-play game from `state` to a terminal position, updating
    /// the table after every move. Returns the number of moves played.
    fn run_episode(
        &mut self,
        state: &mut GameState,
        epsilon: f64,
        params: &TrainingParams,
        report: &mut TrainingReport,
    ) -> Result<usize> {
        let mut moves = 0;
        while !state.is_terminal() {
            let current = encoding::encode(state);
            let legal = state.legal_moves();
            let player = state.current_player();
            let action = self.select_action_epsilon_greedy(current, &legal, player, epsilon)?;

            state.apply_move(action)?;
            moves += 1;

            let next_legal = state.legal_moves();
            let transition = Transition {
                state: current,
                action,
                reward: self.config.rewards.reward(state),
                next_state: encoding::encode(state),
                next_legal: &next_legal,
                next_player: state.current_player(),
            };
            self.q_table.q_learning_update(
                &transition,
                params.learning_rate,
                params.discount_factor,
            );
            report.updates += 1;
        }
        Ok(moves)
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(
        &mut self,
        state: StateId,
        legal_moves: &[Move],
        player: Player,
        epsilon: f64,
    ) -> Result<Move> {
        let choice = if self.rng.random::<f64>() < epsilon {
            // Explore: random action
            legal_moves.choose(&mut self.rng).copied()
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(state, legal_moves, player)
        };
        choice.ok_or_else(|| Error::terminal_state("QLearningAgent::train"))
    }

    /// Greedy move for `state`, without exploration: the highest score when X
    /// is to move, the lowest when O is.
    ///
    /// Ties go to the first legal move in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if `state` is terminal.
    pub fn best_move(&self, state: &GameState) -> Result<Move> {
        if state.is_terminal() {
            return Err(Error::terminal_state("QLearningAgent::best_move"));
        }
        self.q_table
            .greedy_action(
                encoding::encode(state),
                &state.legal_moves(),
                state.current_player(),
            )
            .ok_or_else(|| Error::terminal_state("QLearningAgent::best_move"))
    }
}

impl Strategy for QLearningAgent {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        self.best_move(state)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
