//! Observer port - progress reporting during training
//!
//! Observers receive training events without being able to influence them.
//! They are the only place progress bars and running tallies live.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring self-play training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(episode, outcome)` - After every episode
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use qttt::{ports::Observer, tictactoe::GameOutcome};
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> qttt::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its 0-based index and outcome.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
