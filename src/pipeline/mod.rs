//! Training and evaluation pipelines
//!
//! - Self-play training of a [`SelfPlayLearner`] with opponent-relative
//!   reward attribution
//! - Greedy evaluation against a uniformly random opponent
//! - Observers for progress and outcome metrics

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationResult, evaluate_against_random};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{SelfPlayTrainer, TrainingConfig, TrainingResult, play_episode};

pub use crate::ports::{Observer, SelfPlayLearner};
