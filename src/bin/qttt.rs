//! qttt CLI - self-play Q-learning for tic-tac-toe
//!
//! Trains a tabular agent by playing both sides against itself, then
//! measures it against a uniformly random opponent.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qttt")]
#[command(version, about = "Self-play Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train by self-play, then evaluate against a random opponent
    Train(qttt::cli::commands::train::TrainArgs),
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "qttt=debug" } else { "qttt=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => qttt::cli::commands::train::execute(args),
    }
}
