//! Game environment: board state, legality, win detection and per-move rewards
//!
//! The environment walks through four phases: fresh (after [`Environment::reset`]),
//! in progress (after the first move), won (once [`Environment::check_winner`]
//! finds a completed line) and drawn (once [`Environment::empty_positions`]
//! comes back empty without a winner). Only `reset` leaves a terminal phase.

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Cell, Player},
    game::{DRAW_REWARD, GameOutcome, WIN_REWARD},
    lines::WinningLines,
};
use crate::{Error, Result};

/// Default board edge length
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Result of a single half-move played through [`Environment::step`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Board snapshot after the move
    pub next_state: Board,
    /// Empty cells available to the next player
    pub next_actions: Vec<usize>,
    /// Reward for the player who just moved, from that player's point of view
    pub reward: f64,
}

/// Single in-flight game on an N x N board
#[derive(Debug, Clone)]
pub struct Environment {
    board: Board,
    lines: WinningLines,
    current_player: Player,
    turns: usize,
    terminal: bool,
    winner: Option<Player>,
}

impl Environment {
    /// Player who opens every game
    pub const FIRST_PLAYER: Player = Player::X;

    /// Create a fresh environment for a `size` x `size` board.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "board size must be at least 1".to_string(),
            });
        }
        Ok(Self::with_size(size))
    }

    fn with_size(size: usize) -> Self {
        Environment {
            board: Board::new(size),
            lines: WinningLines::new(size),
            current_player: Self::FIRST_PLAYER,
            turns: 0,
            terminal: false,
            winner: None,
        }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn lines(&self) -> &WinningLines {
        &self.lines
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of marks placed since the last reset
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Whether a completed line has been detected
    pub fn is_won(&self) -> bool {
        self.winner.is_some()
    }

    /// Outcome once the game is terminal, `None` while it is still running
    pub fn outcome(&self) -> Option<GameOutcome> {
        match (self.winner, self.terminal) {
            (Some(player), _) => Some(GameOutcome::Win(player)),
            (None, true) => Some(GameOutcome::Draw),
            (None, false) => None,
        }
    }

    /// Earliest turn count at which a line can be complete (`2N - 1`)
    pub fn min_turns_for_win(&self) -> usize {
        2 * self.size() - 1
    }

    /// Start a new game: empty board, X to move, flags cleared
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Self::FIRST_PLAYER;
        self.turns = 0;
        self.terminal = false;
        self.winner = None;
    }

    /// Whether `position` is on the board and empty
    pub fn is_legal(&self, position: usize) -> bool {
        self.board.get(position) == Some(Cell::Empty)
    }

    /// Place the current player's mark at `position`.
    ///
    /// The turn is not passed; call [`Environment::switch_turn`] for that.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the state untouched if the position is out
    /// of range or already occupied.
    pub fn apply_move(&mut self, position: usize) -> Result<()> {
        match self.board.get(position) {
            None => Err(Error::InvalidPosition {
                position,
                cells: self.board.len(),
            }),
            Some(Cell::Empty) => {
                self.board.set(position, self.current_player.to_cell());
                self.turns += 1;
                Ok(())
            }
            Some(_) => Err(Error::IllegalMove { position }),
        }
    }

    pub fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Scan the winning lines; on a hit mark the game won and terminal
    pub fn check_winner(&mut self) -> bool {
        match self.lines.winner(&self.board) {
            Some(player) => {
                self.winner = Some(player);
                self.terminal = true;
                true
            }
            None => false,
        }
    }

    /// Empty cell indices in ascending order.
    ///
    /// A full board is only recognised as terminal through this call: an empty
    /// result sets the terminal flag.
    pub fn empty_positions(&mut self) -> Vec<usize> {
        if self.board.is_full() {
            self.terminal = true;
        }
        self.board.empty_positions()
    }

    /// Play one half-move for the current player and pass the turn.
    ///
    /// The reward belongs to the mover and is not adjusted for the opponent:
    /// [`WIN_REWARD`] for completing a line, [`DRAW_REWARD`] for filling the
    /// board without one, `0.0` otherwise. Before `2N - 1` marks are down the
    /// reward is always `0.0` and no win check runs.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Environment::apply_move`] for an illegal
    /// action; the turn is not passed in that case.
    pub fn step(&mut self, action: usize) -> Result<StepResult> {
        self.apply_move(action)?;
        let next_state = self.board.clone();
        let next_actions = self.empty_positions();

        let mut reward = 0.0;
        if self.turns >= self.min_turns_for_win() {
            if self.check_winner() {
                reward = WIN_REWARD;
            } else if next_actions.is_empty() {
                reward = DRAW_REWARD;
            }
        }
        self.switch_turn();

        Ok(StepResult {
            next_state,
            next_actions,
            reward,
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::with_size(DEFAULT_BOARD_SIZE)
    }
}
