//! Driver loop for automated games and repeated-trial evaluation

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    Result,
    ports::Strategy,
    tictactoe::{Game, GameOutcome, GameState, Player},
};

/// Play one game from `start` to the end, asking the strategy of whoever is
/// to move for each move.
///
/// # Errors
///
/// Propagates the first error a strategy or the board reports.
pub fn play_from(
    start: GameState,
    x: &mut dyn Strategy,
    o: &mut dyn Strategy,
) -> Result<(GameState, GameOutcome)> {
    let mut state = start;
    loop {
        if let Some(outcome) = GameOutcome::of(&state) {
            return Ok((state, outcome));
        }
        let player: &mut dyn Strategy = match state.current_player() {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let mv = player.select_move(&state)?;
        state.apply_move(mv)?;
    }
}

/// Play one full game from the empty board and keep its move record.
///
/// # Errors
///
/// Propagates the first error a strategy or the board reports.
pub fn play_game(x: &mut dyn Strategy, o: &mut dyn Strategy) -> Result<Game> {
    let mut game = Game::new();
    while game.outcome.is_none() {
        let state = *game.current_state();
        let player: &mut dyn Strategy = match state.current_player() {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let mv = player.select_move(&state)?;
        debug!(player = player.name(), %mv, "move");
        game.play(mv)?;
    }
    Ok(game)
}

/// Result of an evaluation run, counted from the evaluated agent's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Which side the agent played
    pub agent_player: Player,

    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl EvaluationResult {
    /// Create a new evaluation result
    pub fn new(
        agent_player: Player,
        total_games: usize,
        wins: usize,
        draws: usize,
        losses: usize,
    ) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            agent_player,
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Play `games` games of `agent` against `opponent`, with the agent always on
/// the `agent_player` side.
///
/// # Errors
///
/// Propagates the first error a strategy or the board reports.
#[instrument(level = "debug", skip(agent, opponent), fields(agent = agent.name(), opponent = opponent.name()))]
pub fn evaluate(
    agent: &mut dyn Strategy,
    opponent: &mut dyn Strategy,
    games: usize,
    agent_player: Player,
) -> Result<EvaluationResult> {
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;

    for _ in 0..games {
        let game = match agent_player {
            Player::X => play_game(agent, opponent)?,
            Player::O => play_game(opponent, agent)?,
        };

        match game.outcome {
            Some(GameOutcome::Win(winner)) if winner == agent_player => wins += 1,
            Some(GameOutcome::Win(_)) => losses += 1,
            _ => draws += 1,
        }
    }

    Ok(EvaluationResult::new(
        agent_player,
        games,
        wins,
        draws,
        losses,
    ))
}
