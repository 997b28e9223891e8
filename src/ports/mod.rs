//! Ports (trait boundaries) between the training loop and its collaborators.

pub mod learner;
pub mod observer;

pub use learner::SelfPlayLearner;
pub use observer::Observer;
