//! Dense Q-table indexed by canonical state id

use rand::Rng;

use crate::tictactoe::{
    ACTION_COUNT, Move, Player, STATE_COUNT, StateId, encoding::action_index,
};

/// One experienced step of self-play
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// State before the move
    pub state: StateId,
    /// Move that was played
    pub action: Move,
    /// Immediate reward for reaching `next_state`
    pub reward: f64,
    /// State after the move
    pub next_state: StateId,
    /// Legal moves in `next_state`; empty when it is terminal
    pub next_legal: &'a [Move],
    /// Side to move in `next_state`
    pub next_player: Player,
}

/// Q-table mapping every state id to nine action scores
///
/// Covers all 3^9 grids, so any board, reachable or not, has a row. Scores are
/// from X's point of view: X prefers high scores and O prefers low ones.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<[f64; ACTION_COUNT]>,
}

impl QTable {
    /// All-zero table
    pub fn zeros() -> Self {
        Self {
            values: vec![[0.0; ACTION_COUNT]; STATE_COUNT],
        }
    }

    /// Table with every entry drawn uniformly from `[0, scale)`
    pub fn uniform<R: Rng>(scale: f64, rng: &mut R) -> Self {
        let mut table = Self::zeros();
        if scale > 0.0 {
            for row in &mut table.values {
                for value in row.iter_mut() {
                    *value = rng.random_range(0.0..scale);
                }
            }
        }
        table
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateId, action: Move) -> f64 {
        self.values[state.index()][action_index(action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateId, action: Move, value: f64) {
        self.values[state.index()][action_index(action)] = value;
    }

    /// All nine scores of a state, indexed by action index
    pub fn row(&self, state: StateId) -> &[f64; ACTION_COUNT] {
        &self.values[state.index()]
    }

    /// Best score over legal actions for `player`: the maximum for X, the
    /// minimum for O. 0.0 if there are no legal actions.
    pub fn best_value(&self, state: StateId, legal_actions: &[Move], player: Player) -> f64 {
        self.greedy_action(state, legal_actions, player)
            .map_or(0.0, |action| self.get(state, action))
    }

    /// Select the greedy action for `player` from legal actions.
    ///
    /// Ties go to the earliest action in `legal_actions`, which callers pass in
    /// row-major order.
    pub fn greedy_action(
        &self,
        state: StateId,
        legal_actions: &[Move],
        player: Player,
    ) -> Option<Move> {
        let better = |q: f64, best_q: f64| match player {
            Player::X => q > best_q,
            Player::O => q < best_q,
        };
        let mut best: Option<(Move, f64)> = None;
        for &action in legal_actions {
            let q = self.get(state, action);
            match best {
                Some((_, best_q)) if !better(q, best_q) => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ best_a' Q(s',a') - Q(s,a)]
    ///
    /// `best` is the maximum when X moves in `s'` and the minimum when O does.
    /// The bootstrap term is zero when `s'` is terminal. Returns the TD error.
    pub fn q_learning_update(
        &mut self,
        transition: &Transition<'_>,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(transition.state, transition.action);
        let next_q = self.best_value(
            transition.next_state,
            transition.next_legal,
            transition.next_player,
        );
        let td_target = transition.reward + discount_factor * next_q;
        let td_error = td_target - current_q;
        self.set(
            transition.state,
            transition.action,
            current_q + learning_rate * td_error,
        );
        td_error
    }

    /// Get total number of states covered
    pub fn size(&self) -> usize {
        self.values.len()
    }
}
