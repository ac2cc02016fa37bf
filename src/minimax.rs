//! Exact minimax search over the full Tic-Tac-Toe game tree
//!
//! Values are from X's point of view: `+1` X wins, `-1` O wins, `0` draw. X
//! maximizes and O minimizes. Every solved position is memoized on its
//! canonical [`StateId`], and the memo lives as long as the engine, so
//! repeated calls reuse the tree.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
    Error, Result,
    ports::Strategy,
    tictactoe::{GameState, Move, Player, StateId, encoding},
};

/// Utility of a position for X: +1 if X has won, -1 if O has won, else 0
pub fn utility(state: &GameState) -> i8 {
    match state.winner() {
        Some(Player::X) => 1,
        Some(Player::O) => -1,
        None => 0,
    }
}

/// Game-theoretically optimal player
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    name: String,
    cache: HashMap<StateId, i8>,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_name("Minimax")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache: HashMap::new(),
        }
    }

    /// Minimax value of `state` under optimal play by both sides
    ///
    /// # Errors
    ///
    /// Propagates a board error from expanding a child position.
    pub fn value(&mut self, state: &GameState) -> Result<i8> {
        let key = encoding::encode(state);
        if let Some(&value) = self.cache.get(&key) {
            return Ok(value);
        }

        let value = if state.is_terminal() {
            utility(state)
        } else {
            let children = self.evaluate_moves(state)?.into_iter().map(|(_, v)| v);
            let best = match state.current_player() {
                Player::X => children.max(),
                Player::O => children.min(),
            };
            best.ok_or_else(|| Error::Precondition {
                operation: "MinimaxEngine::value",
                reason: "non-terminal state has no legal moves".to_string(),
            })?
        };

        self.cache.insert(key, value);
        Ok(value)
    }

    /// Evaluate every legal move in row-major order and return its minimax value.
    ///
    /// # Errors
    ///
    /// Propagates a board error from expanding a child position.
    pub fn evaluate_moves(&mut self, state: &GameState) -> Result<Vec<(Move, i8)>> {
        let mut moves_with_values = Vec::new();
        for mv in state.legal_moves() {
            let next_state = state.with_move(mv)?;
            moves_with_values.push((mv, self.value(&next_state)?));
        }
        Ok(moves_with_values)
    }

    /// The optimal move for the player to move.
    ///
    /// Several moves are usually optimal; the first one in row-major order wins
    /// the tie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] if `state` is terminal.
    #[instrument(level = "debug", skip(self, state), fields(state_id = %encoding::encode(state)))]
    pub fn best_move(&mut self, state: &GameState) -> Result<Move> {
        if state.is_terminal() {
            return Err(Error::terminal_state("MinimaxEngine::best_move"));
        }

        let target = self.value(state)?;
        let best = self
            .evaluate_moves(state)?
            .into_iter()
            .find(|&(_, value)| value == target)
            .map(|(mv, _)| mv)
            .ok_or_else(|| Error::Precondition {
                operation: "MinimaxEngine::best_move",
                reason: "no legal move reaches the position value".to_string(),
            })?;

        debug!(%best, value = target, cached = self.cache.len(), "minimax move");
        Ok(best)
    }

    /// Number of positions solved so far
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MinimaxEngine {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        self.best_move(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut engine = MinimaxEngine::new();
        assert_eq!(engine.value(&GameState::new()).unwrap(), 0);
        // Every reachable position, and nothing else, ends up in the memo
        assert_eq!(engine.cached_positions(), 5478);
    }

    #[test]
    fn test_takes_immediate_win() {
        let state: GameState = "XX./OO./...".parse().unwrap();
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(state.legal_moves().len(), 5);

        let mut engine = MinimaxEngine::new();
        assert_eq!(engine.best_move(&state).unwrap(), Move::new(0, 2));
        assert_eq!(engine.value(&state).unwrap(), 1);
    }

    #[test]
    fn test_o_blocks_or_wins() {
        // O to move with an open win on the middle row
        let state: GameState = "XX./OO./X..".parse().unwrap();
        assert_eq!(state.current_player(), Player::O);
        let mut engine = MinimaxEngine::new();
        assert_eq!(engine.best_move(&state).unwrap(), Move::new(1, 2));
        assert_eq!(engine.value(&state).unwrap(), -1);
    }

    #[test]
    fn test_tie_break_is_first_row_major() {
        // From the empty board every opening draws, so the corner (0, 0) is chosen
        let mut engine = MinimaxEngine::new();
        let values = engine.evaluate_moves(&GameState::new()).unwrap();
        assert_eq!(values.len(), 9);
        assert!(values.iter().all(|&(_, v)| v == 0));
        assert_eq!(engine.best_move(&GameState::new()).unwrap(), Move::new(0, 0));
    }

    #[test]
    fn test_terminal_state_is_a_precondition_error() {
        let draw: GameState = "XOX/XOO/OXX".parse().unwrap();
        let mut engine = MinimaxEngine::new();
        assert!(matches!(
            engine.best_move(&draw),
            Err(Error::Precondition { .. })
        ));
        assert_eq!(engine.value(&draw).unwrap(), 0);
    }

    #[test]
    fn test_memo_holds_only_outcome_values() {
        let mut engine = MinimaxEngine::new();
        engine.value(&GameState::new()).unwrap();
        assert!(engine.cache.values().all(|v| (-1..=1).contains(v)));

        // X to move with two open lines: every child is expanded, none is dropped
        let state: GameState = "X.O/.X./O..".parse().unwrap();
        let values = engine.evaluate_moves(&state).unwrap();
        assert_eq!(values.len(), state.legal_moves().len());
        assert_eq!(engine.value(&state).unwrap(), 1);
    }

    #[test]
    fn test_utility() {
        let x_won: GameState = "XXX/OO./...".parse().unwrap();
        let o_won: GameState = "XX./OOO/X..".parse().unwrap();
        assert_eq!(utility(&x_won), 1);
        assert_eq!(utility(&o_won), -1);
        assert_eq!(utility(&GameState::new()), 0);
    }
}
