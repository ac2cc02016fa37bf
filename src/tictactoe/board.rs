//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move on the board as a 0-indexed (row, column) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Whether both coordinates lie on the board
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Flattened row-major position (0-8)
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`Move::index`]
    pub fn from_index(index: usize) -> Self {
        Move::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Every board position in row-major order
    pub fn all() -> impl Iterator<Item = Move> {
        (0..CELL_COUNT).map(Move::from_index)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

/// The 3x3 grid of a game in progress
///
/// Whose turn it is never gets stored: it is inferred from the piece counts,
/// so the grid is the whole state. The grid is only ever mutated through
/// [`GameState::apply_move`] and [`GameState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameState {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl GameState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a raw grid without checking the piece-count invariant.
    ///
    /// Used by the state decoder, which must reproduce every digit combination
    /// including grids no game can reach.
    pub fn from_grid(grid: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        GameState { grid }
    }

    /// Read-only view of the grid, row-major
    pub fn grid(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// The nine cells flattened in row-major order
    pub fn cells(&self) -> [Cell; CELL_COUNT] {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, cell) in self.grid.iter().flatten().enumerate() {
            cells[i] = *cell;
        }
        cells
    }

    /// Get the cell at a move's coordinates
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] when the coordinates are off the board.
    pub fn cell(&self, mv: Move) -> Result<Cell, crate::Error> {
        if !mv.in_bounds() {
            return Err(crate::Error::OutOfBounds {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(self.grid[mv.row][mv.col])
    }

    fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in self.grid.iter().flatten() {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = self.count_pieces();
        count.x + count.o
    }

    /// The player who moves next: X when the counts are level, otherwise O
    pub fn current_player(&self) -> Player {
        let count = self.count_pieces();
        if count.x == count.o {
            Player::X
        } else {
            Player::O
        }
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Move> {
        Move::all()
            .filter(|mv| self.grid[mv.row][mv.col] == Cell::Empty)
            .collect()
    }

    /// Get legal moves in this position (empty cells when game not terminal)
    ///
    /// The order is row-major and stable; tie-breaking in both engines relies on it.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Place the current player's mark at `mv`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::OutOfBounds`] if a coordinate is outside 0-2
    /// - [`crate::Error::InvalidMove`] if the cell is occupied or the game is over
    pub fn apply_move(&mut self, mv: Move) -> Result<(), crate::Error> {
        if self.cell(mv)? != Cell::Empty || self.is_terminal() {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        self.grid[mv.row][mv.col] = self.current_player().to_cell();
        Ok(())
    }

    /// Make a move and return a new board state
    #[must_use = "with_move returns a new board state; the original is unchanged"]
    pub fn with_move(&self, mv: Move) -> Result<GameState, crate::Error> {
        let mut next = *self;
        next.apply_move(mv)?;
        Ok(next)
    }

    /// Clear every cell for a new game
    pub fn reset(&mut self) {
        self.grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.grid, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.grid)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }
}

impl FromStr for GameState {
    type Err = crate::Error;

    /// Parse a 9-character board such as `"XX./OO./..."`.
    ///
    /// Whitespace and `/` separators are ignored. The piece counts must satisfy
    /// the alternating-turn invariant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut state = GameState::new();
        for (i, &c) in chars.iter().enumerate() {
            let mv = Move::from_index(i);
            state.grid[mv.row][mv.col] =
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }

        let count = state.count_pieces();
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(state)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if r + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(usize, usize)]) -> GameState {
        let mut state = GameState::new();
        for &(row, col) in moves {
            state.apply_move(Move::new(row, col)).unwrap();
        }
        state
    }

    #[test]
    fn test_new_board() {
        let board = GameState::new();
        assert_eq!(board.current_player(), Player::X);
        assert!(board.grid().iter().flatten().all(|&c| c == Cell::Empty));
        assert_eq!(board.winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_apply_move() {
        let mut board = GameState::new();

        board.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(board.cell(Move::new(1, 1)).unwrap(), Cell::X);
        assert_eq!(board.current_player(), Player::O);

        // Move on occupied cell
        let err = board.apply_move(Move::new(1, 1)).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMove { row: 1, col: 1 }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let mut board = GameState::new();
        let err = board.apply_move(Move::new(3, 0)).unwrap_err();
        assert!(matches!(err, crate::Error::OutOfBounds { row: 3, col: 0 }));

        let err = board.apply_move(Move::new(0, 7)).unwrap_err();
        assert!(matches!(err, crate::Error::OutOfBounds { row: 0, col: 7 }));
        assert_eq!(board, GameState::new());
    }

    #[test]
    fn test_apply_move_after_win_is_rejected() {
        // X wins on the top row
        let mut board = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(board.winner(), Some(Player::X));

        let before = board;
        let err = board.apply_move(Move::new(2, 2)).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMove { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_with_move_leaves_original_unchanged() {
        let board = GameState::new();
        let next = board.with_move(Move::new(0, 0)).unwrap();
        assert_eq!(board, GameState::new());
        assert_eq!(next.cell(Move::new(0, 0)).unwrap(), Cell::X);
    }

    #[test]
    fn test_legal_moves() {
        let mut board = GameState::new();
        assert_eq!(board.legal_moves().len(), 9);
        assert_eq!(board.legal_moves(), Move::all().collect::<Vec<_>>());

        board.apply_move(Move::new(0, 0)).unwrap();
        assert_eq!(board.legal_moves().len(), 8);
        assert!(!board.legal_moves().contains(&Move::new(0, 0)));

        board.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(board.legal_moves().len(), 7);
        assert_eq!(board.legal_moves()[0], Move::new(0, 1));
    }

    #[test]
    fn test_legal_moves_empty_when_won() {
        let board = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.empty_positions().len(), 4);
    }

    #[test]
    fn test_win_detection_vertical() {
        // O wins on middle column
        let board = play(&[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 1)]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::O));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = play(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_draw_detection() {
        let board: GameState = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
        assert!(board.is_draw());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut board = play(&[(0, 0), (1, 1)]);
        board.reset();
        assert_eq!(board, GameState::new());
        assert_eq!(board.current_player(), Player::X);
    }

    #[test]
    fn test_player_alternation() {
        let mut board = GameState::new();
        let mut expected = Player::X;
        for mv in [(1, 1), (0, 0), (2, 2), (0, 2), (0, 1), (2, 1), (1, 0)] {
            assert_eq!(board.current_player(), expected);
            board.apply_move(Move::new(mv.0, mv.1)).unwrap();
            expected = expected.opponent();
        }
    }

    #[test]
    fn test_from_str() {
        let board: GameState = "XX./OO./...".parse().unwrap();
        assert_eq!(board.cell(Move::new(0, 0)).unwrap(), Cell::X);
        assert_eq!(board.cell(Move::new(1, 1)).unwrap(), Cell::O);
        assert_eq!(board.current_player(), Player::X);

        assert!(matches!(
            "XO".parse::<GameState>(),
            Err(crate::Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            "XOZ......".parse::<GameState>(),
            Err(crate::Error::InvalidCellCharacter { character: 'Z', .. })
        ));
        assert!(matches!(
            "XXX......".parse::<GameState>(),
            Err(crate::Error::InvalidPieceCounts { x_count: 3, o_count: 0 })
        ));
    }

    #[test]
    fn test_display() {
        let board: GameState = "XOX.O.X..".parse().unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
    }

    #[test]
    fn test_move_index_roundtrip() {
        for (i, mv) in Move::all().enumerate() {
            assert_eq!(mv.index(), i);
            assert_eq!(Move::from_index(i), mv);
        }
        assert_eq!(Move::new(2, 1).index(), 7);
    }
}
