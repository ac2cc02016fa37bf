//! noughts CLI - Tic-Tac-Toe solver and self-play Q-learning toolkit
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning agent by self-play and evaluating it
//! - Solving positions with exact minimax search
//! - Watching automated games between strategies

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-Tac-Toe solver and self-play Q-learning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent by self-play
    Train(noughts::cli::commands::train::TrainArgs),

    /// Solve a position with exact minimax search
    Solve(noughts::cli::commands::solve::SolveArgs),

    /// Play one automated game between two strategies
    Selfplay(noughts::cli::commands::selfplay::SelfPlayArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => noughts::cli::commands::train::execute(args),
        Commands::Solve(args) => noughts::cli::commands::solve::execute(args),
        Commands::Selfplay(args) => noughts::cli::commands::selfplay::execute(args),
    }
}
