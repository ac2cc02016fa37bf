//! Baseline opponents

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Strategy,
    tictactoe::{GameState, Move},
};

/// Random player - picks uniformly among the legal moves
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a new random player
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a random player with a fixed seed
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomPlayer {
    fn select_move(&mut self, state: &GameState) -> Result<Move> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::terminal_state("RandomPlayer::select_move"));
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_player_picks_legal_moves() {
        let mut player = RandomPlayer::seeded("Random", 11);
        let state: GameState = "XOX/OXO/...".parse().unwrap();
        for _ in 0..20 {
            let mv = player.select_move(&state).unwrap();
            assert_eq!(mv.row, 2);
        }
    }

    #[test]
    fn test_random_player_same_seed_same_moves() {
        let mut a = RandomPlayer::seeded("A", 5);
        let mut b = RandomPlayer::seeded("B", 5);
        let state = GameState::new();
        for _ in 0..10 {
            assert_eq!(
                a.select_move(&state).unwrap(),
                b.select_move(&state).unwrap()
            );
        }
    }

    #[test]
    fn test_random_player_rejects_terminal_state() {
        let mut player = RandomPlayer::seeded("Random", 0);
        let draw: GameState = "XOX/XOO/OXX".parse().unwrap();
        assert!(player.select_move(&draw).is_err());
    }
}
