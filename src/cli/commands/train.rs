//! Train command - Train a Q-learning agent by self-play and evaluate it

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{format_number, format_rate, print_kv, print_section, print_subsection},
    minimax::MinimaxEngine,
    pipeline::{EvaluationResult, MetricsObserver, ProgressObserver, RandomPlayer, evaluate},
    ports::{Strategy, TrainingObserver},
    q_learning::{AgentConfig, QInit, QLearningAgent, TrainingParams, TrainingReport},
    tictactoe::{GameState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent by self-play")]
pub struct TrainArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'n', default_value_t = 20_000)]
    pub episodes: usize,

    /// Learning rate α (0.0-1.0]
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.95)]
    pub gamma: f64,

    /// Initial exploration rate ε (0.0-1.0)
    #[arg(long, default_value_t = 0.2)]
    pub epsilon: f64,

    /// Multiplicative ε decay per episode
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_decay: f64,

    /// Lower bound for ε while decaying
    #[arg(long, default_value_t = 0.0)]
    pub min_epsilon: f64,

    /// Draw initial Q-values uniformly from [0, scale) instead of zero
    #[arg(long)]
    pub q_init_scale: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluation games per opponent and side after training
    #[arg(long, short = 'e', default_value_t = 100)]
    pub eval_games: usize,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    fn agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default();
        if let Some(scale) = self.q_init_scale {
            config = config.with_init(QInit::Uniform { scale });
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn training_params(&self) -> TrainingParams {
        TrainingParams::new(self.alpha, self.gamma, self.epsilon)
            .with_decay(self.epsilon_decay, self.min_epsilon)
    }
}

#[derive(Debug, Serialize)]
struct EvaluationSummary {
    opponent: String,
    #[serde(flatten)]
    result: EvaluationResult,
}

#[derive(Debug, Serialize)]
struct TrainingSummary {
    config: AgentConfig,
    params: TrainingParams,
    training: TrainingReport,
    avg_game_length: f64,
    opening_move: Option<(usize, usize)>,
    evaluation: Vec<EvaluationSummary>,
}

/// Execute the train command
pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent_config();
    let params = args.training_params();

    let mut agent =
        QLearningAgent::new(config.clone()).context("Invalid Q-learning configuration")?;

    let mut metrics = MetricsObserver::new();
    let mut progress = ProgressObserver::new();
    let report = {
        let mut observers: Vec<&mut dyn TrainingObserver> = Vec::new();
        observers.push(&mut metrics);
        if !args.no_progress {
            observers.push(&mut progress);
        }
        agent
            .train_observed(args.episodes, &params, &mut observers)
            .context("Training failed")?
    };

    let opening_move = agent
        .best_move(&GameState::new())
        .ok()
        .map(|mv| (mv.row, mv.col));
    let evaluation = run_evaluation(&mut agent, args.eval_games, args.seed)?;

    let summary = TrainingSummary {
        config,
        params,
        training: report,
        avg_game_length: metrics.avg_game_length(),
        opening_move,
        evaluation,
    };

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{rendered}");
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn run_evaluation(
    agent: &mut QLearningAgent,
    games: usize,
    seed: Option<u64>,
) -> Result<Vec<EvaluationSummary>> {
    let mut results = Vec::new();
    if games == 0 {
        return Ok(results);
    }

    let mut minimax = MinimaxEngine::new();
    let mut random = match seed {
        Some(seed) => RandomPlayer::seeded("Random", seed.wrapping_add(1)),
        None => RandomPlayer::new("Random"),
    };

    for side in [Player::X, Player::O] {
        let opponents: [&mut dyn Strategy; 2] = [&mut minimax, &mut random];
        for opponent in opponents {
            let name = opponent.name().to_string();
            let result = evaluate(&mut *agent, opponent, games, side)
                .with_context(|| format!("Evaluation against {name} failed"))?;
            results.push(EvaluationSummary {
                opponent: name,
                result,
            });
        }
    }
    Ok(results)
}

fn print_summary(summary: &TrainingSummary) {
    print_section("Q-Learning Self-Play Training");
    print_kv("Episodes", &format_number(summary.training.episodes_run));
    print_kv("Learning rate", &summary.params.learning_rate.to_string());
    print_kv("Discount", &summary.params.discount_factor.to_string());
    print_kv("Initial epsilon", &summary.params.epsilon.to_string());
    print_kv(
        "Final epsilon",
        &format!("{:.4}", summary.training.final_epsilon),
    );
    print_kv("Q-table updates", &format_number(summary.training.updates));
    if summary.training.cancelled {
        print_kv("Status", "cancelled");
    }

    print_subsection("Self-play outcomes");
    print_kv("X wins", &format_number(summary.training.x_wins));
    print_kv("O wins", &format_number(summary.training.o_wins));
    print_kv("Draws", &format_number(summary.training.draws));
    print_kv("Avg moves", &format!("{:.2}", summary.avg_game_length));
    if let Some((row, col)) = summary.opening_move {
        print_kv("Greedy opening", &format!("({row}, {col})"));
    }

    if summary.evaluation.is_empty() {
        return;
    }

    print_subsection("Greedy policy evaluation");
    for entry in &summary.evaluation {
        let result = &entry.result;
        print_kv(
            &format!("as {} vs {}", result.agent_player, entry.opponent),
            &format!(
                "W {} / D {} / L {}  ({} draws)",
                result.wins,
                result.draws,
                result.losses,
                format_rate(result.draw_rate)
            ),
        );
    }
}
