//! Strategy port - the single "choose an action" entry point
//!
//! A presentation layer or driver loop calls [`Strategy::select_move`] exactly
//! once when it is the automated player's turn, then applies the returned move
//! itself. Both decision engines and the random baseline implement it.

use crate::{
    Result,
    tictactoe::{GameState, Move},
};

/// An automated player
///
/// # Examples
///
/// ```
/// use noughts::{minimax::MinimaxEngine, ports::Strategy, tictactoe::GameState};
///
/// let mut engine = MinimaxEngine::new();
/// let mut state = GameState::new();
/// while !state.is_terminal() {
///     let mv = engine.select_move(&state).unwrap();
///     state.apply_move(mv).unwrap();
/// }
/// assert_eq!(state.winner(), None);
/// ```
pub trait Strategy: Send {
    /// Choose a move for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Precondition`] if the state is terminal.
    fn select_move(&mut self, state: &GameState) -> Result<Move>;

    /// Get the strategy's name.
    ///
    /// Used for identification in game logs and evaluation summaries.
    fn name(&self) -> &str;

    /// Seed the strategy's internal random number generator.
    ///
    /// Deterministic strategies can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
