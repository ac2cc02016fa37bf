//! Canonical base-3 state identifiers
//!
//! Each of the nine cells, read in row-major order, is one base-3 digit
//! (`Empty = 0`, `X = 1`, `O = 2`), with cell `k` weighted by `3^k`. The
//! mapping is a bijection between grids and `0..STATE_COUNT`, so it covers
//! unreachable grids as well and never aliases two boards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, CELL_COUNT, Cell, GameState, Move};

/// Number of distinct grids: 3^9
pub const STATE_COUNT: usize = 19_683;

/// Number of actions, one per flattened board position
pub const ACTION_COUNT: usize = CELL_COUNT;

/// Identifier of a full grid configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(u16);

impl StateId {
    /// Wrap a raw id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateId`] when `id >= STATE_COUNT`.
    pub fn new(id: usize) -> Result<Self, crate::Error> {
        if id >= STATE_COUNT {
            return Err(crate::Error::InvalidStateId { id });
        }
        Ok(StateId(id as u16))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn digit(cell: Cell) -> usize {
    match cell {
        Cell::Empty => 0,
        Cell::X => 1,
        Cell::O => 2,
    }
}

fn cell_for_digit(digit: usize) -> Cell {
    match digit {
        0 => Cell::Empty,
        1 => Cell::X,
        _ => Cell::O,
    }
}

/// Compute the canonical id of a grid
pub fn encode(state: &GameState) -> StateId {
    let id = state
        .cells()
        .iter()
        .rev()
        .fold(0usize, |acc, &cell| acc * 3 + digit(cell));
    StateId(id as u16)
}

/// Rebuild the grid for an id; exact inverse of [`encode`]
pub fn decode(id: StateId) -> GameState {
    let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    let mut rest = id.index();
    for mv in Move::all() {
        grid[mv.row][mv.col] = cell_for_digit(rest % 3);
        rest /= 3;
    }
    GameState::from_grid(grid)
}

/// Q-table column for a move: `row * 3 + col`
pub fn action_index(mv: Move) -> usize {
    mv.index()
}
