//! Command-line interface for training and evaluating self-play agents

pub mod commands;
pub mod config;
pub mod output;
