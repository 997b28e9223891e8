//! Observer implementations for training pipelines

use std::collections::VecDeque;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary of self-play outcome metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    /// Draw rate over the most recent window of episodes
    pub recent_draw_rate: f64,
}

/// Metrics observer - Tracks outcome rates during training
///
/// Besides overall counts it keeps a sliding window of recent outcomes; a
/// rising recent draw rate is the usual sign that both sides of self-play
/// have converged on sound play.
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    window: usize,
    recent: VecDeque<GameOutcome>,
}

impl MetricsObserver {
    /// Default size of the recent-outcome window
    pub const DEFAULT_WINDOW: usize = 100;

    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            window: window.max(1),
            recent: VecDeque::new(),
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    fn rate(&self, count: usize) -> f64 {
        let total = self.total_episodes();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    pub fn recent_draw_rate(&self) -> f64 {
        if self.recent.is_empty() {
            0.0
        } else {
            let draws = self
                .recent
                .iter()
                .filter(|o| **o == GameOutcome::Draw)
                .count();
            draws as f64 / self.recent.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.rate(self.x_wins),
            o_win_rate: self.rate(self.o_wins),
            draw_rate: self.rate(self.draws),
            recent_draw_rate: self.recent_draw_rate(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(outcome);
        Ok(())
    }
}
