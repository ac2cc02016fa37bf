//! Tic-Tac-Toe game implementation

pub mod board;
pub mod encoding;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, CELL_COUNT, Cell, GameState, Move, Player};
pub use encoding::{ACTION_COUNT, STATE_COUNT, StateId};
pub use game::{Game, GameOutcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
