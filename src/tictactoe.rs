//! Tic-Tac-Toe on an N x N board

pub mod board;
pub mod environment;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Player};
pub use environment::{DEFAULT_BOARD_SIZE, Environment, StepResult};
pub use game::{DRAW_REWARD, GameOutcome, LOSS_REWARD, WIN_REWARD};
pub use lines::WinningLines;
