//! CLI subcommands

pub mod train;
