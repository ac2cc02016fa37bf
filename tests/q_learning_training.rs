//! Self-play Q-learning: training contract and policy quality

use std::thread;

use noughts::{
    minimax::MinimaxEngine,
    pipeline::{CancelObserver, MetricsObserver, RandomPlayer, evaluate},
    ports::TrainingObserver,
    q_learning::{AgentConfig, QInit, QLearningAgent, TrainingParams},
    tictactoe::{GameOutcome, Player},
};

fn seeded_agent(seed: u64) -> QLearningAgent {
    QLearningAgent::new(AgentConfig::default().with_seed(seed)).unwrap()
}

#[test]
fn test_zero_episodes_leaves_table_identical() {
    let mut agent = QLearningAgent::new(
        AgentConfig::default()
            .with_seed(3)
            .with_init(QInit::Uniform { scale: 0.5 }),
    )
    .unwrap();
    let before = agent.q_table().clone();
    let report = agent.train(0, &TrainingParams::default()).unwrap();
    assert_eq!(report.episodes_run, 0);
    assert_eq!(agent.q_table(), &before);
}

fn trained_agent(seed: u64) -> QLearningAgent {
    let mut agent = seeded_agent(seed);
    let params = TrainingParams::new(0.5, 0.95, 1.0).with_decay(0.9999, 0.3);
    let report = agent.train(50_000, &params).unwrap();
    assert_eq!(report.episodes_run, 50_000);
    agent
}

#[test]
fn test_trained_agent_never_loses_to_minimax_on_either_side() {
    let mut agent = trained_agent(1);
    for side in [Player::X, Player::O] {
        let mut minimax = MinimaxEngine::new();
        let result = evaluate(&mut agent, &mut minimax, 1, side).unwrap();
        assert_eq!(result.losses, 0, "lost to minimax as {side}");
    }
}

#[test]
fn test_training_loses_less_to_random_than_no_training() {
    let mut trained = trained_agent(2);
    let mut untrained = seeded_agent(2);

    for (side, seed) in [(Player::X, 11), (Player::O, 12)] {
        let mut opponent = RandomPlayer::seeded("random", seed);
        let after = evaluate(&mut trained, &mut opponent, 500, side).unwrap();
        let mut opponent = RandomPlayer::seeded("random", seed);
        let before = evaluate(&mut untrained, &mut opponent, 500, side).unwrap();

        assert!(
            after.losses < before.losses,
            "as {side}: trained lost {}, untrained lost {}",
            after.losses,
            before.losses
        );
    }
}

#[test]
fn test_report_counts_every_episode() {
    let mut agent = seeded_agent(5);
    let mut metrics = MetricsObserver::new();
    let report = agent
        .train_observed(300, &TrainingParams::default(), &mut [&mut metrics])
        .unwrap();

    assert_eq!(report.x_wins + report.o_wins + report.draws, 300);
    assert!(report.updates >= 300 * 5);
    assert!(report.updates <= 300 * 9);
    let summary = metrics.summary();
    assert_eq!(summary.total_episodes, 300);
    assert_eq!(summary.x_wins, report.x_wins);
    assert_eq!(
        (summary.avg_game_length * 300.0).round() as usize,
        report.updates
    );
}

#[test]
fn test_cancellation_stops_between_episodes() {
    let mut agent = seeded_agent(6);
    let mut cancel = CancelObserver::new();
    cancel.cancel();
    let report = agent
        .train_observed(1_000, &TrainingParams::default(), &mut [&mut cancel])
        .unwrap();
    assert!(report.cancelled);
    assert_eq!(report.episodes_run, 0);
}

struct StopAfter {
    limit: usize,
    seen: usize,
}

impl TrainingObserver for StopAfter {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: GameOutcome,
        _moves: usize,
        _epsilon: f64,
    ) -> noughts::Result<()> {
        self.seen += 1;
        Ok(())
    }

    fn should_stop(&self) -> bool {
        self.seen >= self.limit
    }
}

#[test]
fn test_observer_can_stop_training_early() {
    let mut agent = seeded_agent(7);
    let mut stop = StopAfter { limit: 25, seen: 0 };
    let report = agent
        .train_observed(1_000, &TrainingParams::default(), &mut [&mut stop])
        .unwrap();
    assert!(report.cancelled);
    assert_eq!(report.episodes_run, 25);
    assert_eq!(report.episodes_requested, 1_000);
}

#[test]
fn test_cancel_flag_set_from_another_thread() {
    let cancel = CancelObserver::new();
    let flag = cancel.flag();
    thread::spawn(move || flag.store(true, std::sync::atomic::Ordering::SeqCst))
        .join()
        .unwrap();

    let mut observer = cancel.clone();
    let mut agent = seeded_agent(8);
    let report = agent
        .train_observed(10, &TrainingParams::default(), &mut [&mut observer])
        .unwrap();
    assert_eq!(report.episodes_run, 0);
}
