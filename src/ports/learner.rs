//! Learner port - what the self-play trainer needs from a value learner

use crate::tictactoe::{Board, Player};

/// Learner trait for two-player self-play
///
/// One learner plays both sides. Every call names the player identity it is
/// acting for, so implementations can keep per-player state.
///
/// # Examples
///
/// ```no_run
/// use qttt::{
///     ports::SelfPlayLearner,
///     tictactoe::{Board, Player},
/// };
///
/// struct FirstFree;
///
/// impl SelfPlayLearner for FirstFree {
///     fn choose_action(&mut self, _: Player, _: &Board, actions: &[usize]) -> Option<usize> {
///         actions.first().copied()
///     }
///
///     fn update_value(
///         &mut self,
///         _player: Player,
///         _state: &Board,
///         _action: usize,
///         _reward: f64,
///         _next_state: &Board,
///         _next_actions: &[usize],
///         _opponent: Player,
///     ) {
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait SelfPlayLearner {
    /// Pick an action for `player` among `actions`.
    ///
    /// Returns `None` only when there is nothing to choose from; the trainer
    /// treats that as the end of the episode.
    fn choose_action(&mut self, player: Player, state: &Board, actions: &[usize])
    -> Option<usize>;

    /// Apply one value update for `player` having taken `action` in `state`.
    ///
    /// `reward` is already expressed from `player`'s point of view;
    /// `opponent` names the table to bootstrap from at `next_state`.
    #[allow(clippy::too_many_arguments)]
    fn update_value(
        &mut self,
        player: Player,
        state: &Board,
        action: usize,
        reward: f64,
        next_state: &Board,
        next_actions: &[usize],
        opponent: Player,
    );

    /// Get the learner's name.
    ///
    /// Used for identification in logging.
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, for learners without randomness.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
