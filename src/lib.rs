//! Tabular self-play Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - An N x N tic-tac-toe environment with per-move rewards
//! - A Q-learning agent with one value table per player identity
//! - A self-play trainer with opponent-relative reward attribution
//! - Greedy evaluation against a uniformly random opponent

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use pipeline::{
    EvaluationConfig, EvaluationResult, SelfPlayTrainer, TrainingConfig, TrainingResult,
    evaluate_against_random,
};
pub use q_learning::{AgentConfig, QAgent};
pub use tictactoe::{Environment, GameOutcome, Player};
