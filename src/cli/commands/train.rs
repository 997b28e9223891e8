//! Train command - self-play training followed by evaluation against random play

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{config::RunConfig, output},
    pipeline::{
        EvaluationResult, MetricsObserver, MetricsSummary, ProgressObserver, SelfPlayTrainer,
        TrainingResult, evaluate_against_random,
    },
    ports::Observer,
    q_learning::{AgentConfig, QAgent},
    tictactoe::{DEFAULT_BOARD_SIZE, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent by self-play and evaluate it")]
pub struct TrainArgs {
    /// Number of self-play training episodes
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Number of evaluation games against a random opponent
    #[arg(long, short = 'g', default_value_t = 100)]
    pub eval_games: usize,

    /// Board edge length (N for an N x N board)
    #[arg(long, short = 'n', default_value_t = DEFAULT_BOARD_SIZE)]
    pub board_size: usize,

    /// Learning rate α
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration probability ε during training
    #[arg(long, default_value_t = 0.2)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the training progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl TrainArgs {
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig {
            agent: AgentConfig::new(self.alpha, self.gamma, self.epsilon),
            ..RunConfig::default()
        }
        .with_board_size(self.board_size)
        .with_seed(self.seed);
        config.training.episodes = self.episodes;
        config.evaluation.games = self.eval_games;
        config
    }
}

#[derive(Debug, Serialize)]
struct TableSizes {
    x: usize,
    o: usize,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a RunConfig,
    training: &'a TrainingResult,
    metrics: MetricsSummary,
    table_sizes: TableSizes,
    evaluation: &'a EvaluationResult,
}

/// Shares a [`MetricsObserver`] with the trainer while keeping read access.
struct SharedMetrics(Arc<Mutex<MetricsObserver>>);

impl Observer for SharedMetrics {
    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> crate::Result<()> {
        match self.0.lock() {
            Ok(mut metrics) => metrics.on_episode_end(episode, outcome),
            Err(poisoned) => poisoned.into_inner().on_episode_end(episode, outcome),
        }
    }
}

const DEFAULT_SUMMARY_FILE: &str = "training_summary.json";

/// Resolve `--summary` to a JSON file path.
///
/// A trailing separator or an existing directory selects
/// [`DEFAULT_SUMMARY_FILE`] inside it; any other extension is replaced by `.json`.
fn summary_file_path(raw: &Path) -> PathBuf {
    let names_directory = raw
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR)
        || raw.file_name().is_none()
        || raw.is_dir();
    if names_directory {
        return raw.join(DEFAULT_SUMMARY_FILE);
    }

    if raw
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        raw.to_path_buf()
    } else {
        raw.with_extension("json")
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.run_config();
    config.validate().context("invalid run configuration")?;

    let mut agent = QAgent::new(config.agent)?;

    output::print_section("Configuration");
    output::print_kv("Board", &format!("{0}x{0}", config.training.board_size));
    output::print_kv(
        "Hyperparameters",
        &format!(
            "α={} γ={} ε={}",
            config.agent.learning_rate, config.agent.discount_factor, config.agent.epsilon
        ),
    );
    output::print_kv("Episodes", &output::format_number(config.training.episodes));
    output::print_kv("Evaluation games", &output::format_number(config.evaluation.games));
    if let Some(seed) = config.training.seed {
        output::print_kv("Seed", &seed.to_string());
    }

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut trainer = SelfPlayTrainer::new(config.training.clone())
        .with_observer(Box::new(SharedMetrics(metrics.clone())));
    if !args.no_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    let training = trainer.run(&mut agent)?;
    let table_sizes = agent.table_sizes();
    output::print_training(&training, table_sizes);

    let evaluation = evaluate_against_random(&mut agent, &config.evaluation)?;
    output::print_evaluation(&evaluation);

    if let Some(raw_path) = &args.summary {
        let path = summary_file_path(raw_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let metrics = match metrics.lock() {
            Ok(guard) => guard.summary(),
            Err(poisoned) => poisoned.into_inner().summary(),
        };
        let summary = TrainingSummaryFile {
            config: &config,
            training: &training,
            metrics,
            table_sizes: TableSizes {
                x: table_sizes.0,
                o: table_sizes.1,
            },
            evaluation: &evaluation,
        };

        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to: {}", path.display());
    }

    Ok(())
}
