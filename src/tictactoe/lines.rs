//! Winning line analysis for Tic-Tac-Toe

use super::{BOARD_SIZE, Cell, Move, Player};

/// The eight lines that win the game: 3 rows, 3 columns, 2 diagonals
pub const WINNING_LINES: [[Move; 3]; 8] = [
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)], // rows
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)], // columns
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)], // diagonals
];

type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row
    pub fn has_won(grid: &Grid, player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|mv| grid[mv.row][mv.col] == target))
    }

    /// The owner of the first completed line, if any.
    ///
    /// A grid with two different winners cannot be reached by legal play; for
    /// such a grid the first line in [`WINNING_LINES`] order decides.
    pub fn winner(grid: &Grid) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let first = grid[line[0].row][line[0].col];
            let owner = first.player()?;
            line.iter()
                .all(|mv| grid[mv.row][mv.col] == first)
                .then_some(owner)
        })
    }

    /// Find all positions that would immediately win for the player
    pub fn winning_moves(grid: &Grid, player: Player) -> Vec<Move> {
        let mut moves: Vec<Move> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(grid, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Find the winning move in a specific line, if one exists
    fn winning_move_in_line(grid: &Grid, player: Player, line: &[Move; 3]) -> Option<Move> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty = None;

        for &mv in line {
            match grid[mv.row][mv.col] {
                Cell::Empty => {
                    if empty.is_some() {
                        return None;
                    }
                    empty = Some(mv);
                }
                c if c == target => count += 1,
                _ => return None, // Opponent piece in line
            }
        }

        if count == 2 { empty } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize, Cell)]) -> Grid {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for &(row, col, cell) in cells {
            grid[row][col] = cell;
        }
        grid
    }

    #[test]
    fn test_has_won_horizontal() {
        let grid = grid_with(&[(0, 0, Cell::X), (0, 1, Cell::X), (0, 2, Cell::X)]);
        assert!(LineAnalyzer::has_won(&grid, Player::X));
        assert!(!LineAnalyzer::has_won(&grid, Player::O));
        assert_eq!(LineAnalyzer::winner(&grid), Some(Player::X));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let grid = grid_with(&[(0, 2, Cell::O), (1, 1, Cell::O), (2, 0, Cell::O)]);
        assert!(LineAnalyzer::has_won(&grid, Player::O));
        assert_eq!(LineAnalyzer::winner(&grid), Some(Player::O));
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let grid = grid_with(&[]);
        assert_eq!(LineAnalyzer::winner(&grid), None);
    }

    #[test]
    fn test_winning_moves_multiple() {
        // XX.
        // X..
        // ...
        let grid = grid_with(&[(0, 0, Cell::X), (0, 1, Cell::X), (1, 0, Cell::X)]);
        let moves = LineAnalyzer::winning_moves(&grid, Player::X);
        assert_eq!(moves, vec![Move::new(0, 2), Move::new(2, 0)]);
        assert!(LineAnalyzer::winning_moves(&grid, Player::O).is_empty());
    }

    #[test]
    fn test_blocked_line_has_no_winning_move() {
        let grid = grid_with(&[(0, 0, Cell::X), (0, 1, Cell::X), (0, 2, Cell::O)]);
        assert!(LineAnalyzer::winning_moves(&grid, Player::X).is_empty());
    }
}
