//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{GameState, Move, Player};

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal state, `None` while the game is still running
    pub fn of(state: &GameState) -> Option<Self> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

/// A complete game with history, always starting from the empty board
#[derive(Debug, Clone, Default, Serialize)]
pub struct Game {
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
    #[serde(skip)]
    state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play a move for whoever is to move
    pub fn play(&mut self, mv: Move) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        self.state.apply_move(mv)?;
        self.moves.push(mv);
        self.outcome = GameOutcome::of(&self.state);
        Ok(())
    }

    /// Current board state
    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    /// Every position of the game, starting with the empty board
    ///
    /// # Errors
    ///
    /// Returns error if a recorded move is illegal. Moves only enter the
    /// record through [`Game::play`], so this indicates a bug.
    pub fn state_sequence(&self) -> Result<Vec<GameState>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = GameState::new();
        states.push(state);
        for &mv in &self.moves {
            state.apply_move(mv)?;
            states.push(state);
        }
        Ok(states)
    }
}
