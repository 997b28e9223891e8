//! Run configuration assembled from command-line flags

use serde::{Deserialize, Serialize};

use crate::{
    pipeline::{EvaluationConfig, TrainingConfig},
    q_learning::AgentConfig,
};

/// Everything needed for one train-then-evaluate run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
    pub evaluation: EvaluationConfig,
}

impl RunConfig {
    /// Share one seed across the run.
    ///
    /// The evaluation opponent gets `seed + 1` so it never replays the
    /// agent's exploration stream.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.training.seed = seed;
        self.evaluation.seed = seed.map(|s| s.wrapping_add(1));
        self
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.training.board_size = board_size;
        self.evaluation.board_size = board_size;
        self
    }

    /// Validate every part of the run.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn validate(&self) -> crate::Result<()> {
        self.agent.validate()?;
        if self.training.board_size == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "board size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
