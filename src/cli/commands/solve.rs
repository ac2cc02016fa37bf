//! Solve command - Exact minimax analysis of one position

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{print_board, print_kv, print_section, print_subsection},
    minimax::MinimaxEngine,
    tictactoe::{GameOutcome, GameState, LineAnalyzer, Move, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Solve a position with exact minimax search")]
pub struct SolveArgs {
    /// Board as nine characters (X, O, '.'), rows optionally separated by '/'
    #[arg(default_value = ".../.../...")]
    pub board: String,

    /// Print the analysis as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MoveValue {
    row: usize,
    col: usize,
    value: i8,
}

#[derive(Debug, Serialize)]
struct SolveSummary {
    board: String,
    to_move: Player,
    value: i8,
    moves: Vec<MoveValue>,
    best_move: Move,
    immediate_wins: Vec<Move>,
    threats_to_block: Vec<Move>,
}

fn describe_value(value: i8) -> &'static str {
    match value {
        1 => "X wins",
        -1 => "O wins",
        _ => "draw",
    }
}

fn analyze(state: &GameState) -> Result<SolveSummary> {
    let mut engine = MinimaxEngine::new();
    let to_move = state.current_player();
    let value = engine.value(state)?;
    let moves = engine
        .evaluate_moves(state)?
        .into_iter()
        .map(|(mv, value)| MoveValue {
            row: mv.row,
            col: mv.col,
            value,
        })
        .collect();
    let best_move = engine
        .best_move(state)
        .context("Position has no legal moves")?;

    Ok(SolveSummary {
        board: state.to_string().replace('\n', "/"),
        to_move,
        value,
        moves,
        best_move,
        immediate_wins: LineAnalyzer::winning_moves(state.grid(), to_move),
        threats_to_block: LineAnalyzer::winning_moves(state.grid(), to_move.opponent()),
    })
}

/// Execute the solve command
pub fn execute(args: SolveArgs) -> Result<()> {
    let state: GameState = args
        .board
        .parse()
        .with_context(|| format!("Invalid board '{}'", args.board))?;

    if let Some(outcome) = GameOutcome::of(&state) {
        let result = match outcome {
            GameOutcome::Win(player) => format!("{player} has won"),
            GameOutcome::Draw => "draw".to_string(),
        };
        bail!("Game is already over ({result})");
    }

    let summary = analyze(&state)?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize analysis")?;
        println!("{rendered}");
        return Ok(());
    }

    print_section("Minimax Analysis");
    print_board(&state);
    print_kv("To move", &summary.to_move.to_string());
    print_kv("Value", describe_value(summary.value));

    print_subsection("Move values");
    for mv in &summary.moves {
        print_kv(
            &format!("({}, {})", mv.row, mv.col),
            &format!("{:+} ({})", mv.value, describe_value(mv.value)),
        );
    }

    if !summary.immediate_wins.is_empty() {
        let wins: Vec<String> = summary.immediate_wins.iter().map(Move::to_string).collect();
        print_kv("Winning now", &wins.join(" "));
    }
    if !summary.threats_to_block.is_empty() {
        let threats: Vec<String> = summary
            .threats_to_block
            .iter()
            .map(Move::to_string)
            .collect();
        print_kv("Must block", &threats.join(" "));
    }
    print_kv("Best move", &summary.best_move.to_string());

    Ok(())
}
