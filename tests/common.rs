//! Common test utilities for the noughts test suite.

use std::collections::{HashSet, VecDeque};

use noughts::tictactoe::GameState;

/// Every position reachable from the empty board by legal play, in
/// breadth-first order.
#[allow(dead_code)]
pub fn reachable_states() -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([GameState::new()]);
    seen.insert(GameState::new());

    while let Some(state) = queue.pop_front() {
        order.push(state);
        for mv in state.legal_moves() {
            let next = state.with_move(mv).expect("legal move must apply");
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    order
}

/// Parse a board literal, panicking on bad test input.
#[allow(dead_code)]
pub fn board(text: &str) -> GameState {
    text.parse().expect("test board must parse")
}
