//! Game outcomes and per-move reward constants

use serde::{Deserialize, Serialize};

use super::board::Player;

/// Reward for the move that completes a line
pub const WIN_REWARD: f64 = 1.0;

/// Reward for the move that fills the board without a winner
pub const DRAW_REWARD: f64 = -0.5;

/// Reward patched onto a move when the opponent's reply wins
pub const LOSS_REWARD: f64 = -1.0;

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}
