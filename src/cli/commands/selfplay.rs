//! Self-play command - Play one automated game between two strategies

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{QTrainingConfig, StrategyKind, build_strategy},
        output::{print_board, print_kv, print_section, print_subsection},
    },
    pipeline::play_game,
    tictactoe::{Game, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Play one automated game and print every position")]
pub struct SelfPlayArgs {
    /// Strategy controlling X
    #[arg(long, value_enum, default_value = "minimax")]
    pub x: StrategyKind,

    /// Strategy controlling O
    #[arg(long, value_enum, default_value = "minimax")]
    pub o: StrategyKind,

    /// Self-play training episodes for a Q-learning side
    #[arg(long, short = 'n', default_value_t = 20_000)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

fn run(args: &SelfPlayArgs) -> Result<Game> {
    let q_training = QTrainingConfig {
        episodes: args.episodes,
        ..QTrainingConfig::default()
    };
    let mut x = build_strategy(args.x, args.seed, &q_training).context("Failed to set up X")?;
    // O gets its own stream so two random players do not mirror each other
    let o_seed = args.seed.map(|seed| seed.wrapping_add(1));
    let mut o = build_strategy(args.o, o_seed, &q_training).context("Failed to set up O")?;

    play_game(x.as_mut(), o.as_mut()).context("Game aborted")
}

/// Execute the self-play command
pub fn execute(args: SelfPlayArgs) -> Result<()> {
    let game = run(&args)?;

    print_section(&format!("{:?} (X) vs {:?} (O)", args.x, args.o));
    let states = game.state_sequence()?;
    for (ply, (state, mv)) in states.iter().skip(1).zip(&game.moves).enumerate() {
        let player = if ply % 2 == 0 { "X" } else { "O" };
        print_subsection(&format!("Move {}: {player} plays {mv}", ply + 1));
        print_board(state);
    }

    let result = match game.outcome {
        Some(GameOutcome::Win(player)) => format!("{player} wins"),
        Some(GameOutcome::Draw) => "draw".to_string(),
        None => "unfinished".to_string(),
    };
    println!();
    print_kv("Result", &result);
    print_kv("Moves", &game.moves.len().to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimax_selfplay_draws() {
        let args = SelfPlayArgs::parse_from(["selfplay"]);
        let game = run(&args).unwrap();
        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }

    #[test]
    fn test_minimax_beats_or_draws_random() {
        let args = SelfPlayArgs::parse_from(["selfplay", "--o", "random", "--seed", "8"]);
        let game = run(&args).unwrap();
        assert!(matches!(
            game.outcome,
            Some(GameOutcome::Win(crate::tictactoe::Player::X)) | Some(GameOutcome::Draw)
        ));
    }

    #[test]
    fn test_q_side_is_trained_before_playing() {
        let args = SelfPlayArgs::parse_from([
            "selfplay", "--x", "q", "--o", "random", "--episodes", "20", "--seed", "1",
        ]);
        let game = run(&args).unwrap();
        assert!(game.outcome.is_some());
    }
}
