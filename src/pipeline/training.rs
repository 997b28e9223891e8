//! Self-play training loop
//!
//! One learner plays both sides. Each pass of the loop plays up to two plies
//! so the first mover's reward can be corrected once the reply is known: a
//! reply that wins turns the first mover's neutral reward into
//! [`LOSS_REWARD`] before its update is applied.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Observer, SelfPlayLearner},
    tictactoe::{DEFAULT_BOARD_SIZE, Environment, GameOutcome, LOSS_REWARD, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Board edge length
    pub board_size: usize,

    /// Random seed handed to the learner
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            board_size: DEFAULT_BOARD_SIZE,
            seed: None,
        }
    }
}

/// Outcome tallies of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Episodes won by X
    pub x_wins: usize,

    /// Episodes won by O
    pub o_wins: usize,

    /// Episodes ending without a winner
    pub draws: usize,
}

impl TrainingResult {
    fn record(&mut self, outcome: GameOutcome) {
        self.episodes += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.draws as f64 / self.episodes as f64
        }
    }
}

/// Self-play trainer driving a [`SelfPlayLearner`] through repeated episodes
pub struct SelfPlayTrainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl SelfPlayTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of episodes. No early stopping.
    ///
    /// # Errors
    ///
    /// Fails on an invalid board size, an illegal action from the learner, or
    /// an observer error.
    pub fn run<L: SelfPlayLearner + ?Sized>(&mut self, learner: &mut L) -> Result<TrainingResult> {
        let mut env = Environment::new(self.config.board_size)?;
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed);
        }

        tracing::info!(
            learner = learner.name(),
            episodes = self.config.episodes,
            board_size = self.config.board_size,
            "starting self-play training"
        );

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut result = TrainingResult::default();
        for episode in 0..self.config.episodes {
            let outcome = play_episode(&mut env, learner)?;
            result.record(outcome);
            tracing::debug!(episode, ?outcome, turns = env.turns(), "episode finished");

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        tracing::info!(
            x_wins = result.x_wins,
            o_wins = result.o_wins,
            draws = result.draws,
            "self-play training finished"
        );

        Ok(result)
    }
}

/// Play one self-play episode from a fresh board, updating as it goes.
///
/// An episode that stops because a learner has no action to offer counts as a
/// draw.
///
/// # Errors
///
/// Propagates illegal-move errors from the environment.
pub fn play_episode<L: SelfPlayLearner + ?Sized>(
    env: &mut Environment,
    learner: &mut L,
) -> Result<GameOutcome> {
    env.reset();

    while !env.is_terminal() {
        let state_0 = env.board().clone();
        let player_0 = env.current_player();
        let actions_0 = env.empty_positions();
        let Some(action_0) = learner.choose_action(player_0, &state_0, &actions_0) else {
            break;
        };

        let first = env.step(action_0)?;
        if env.is_terminal() {
            learner.update_value(
                player_0,
                &state_0,
                action_0,
                first.reward,
                &first.next_state,
                &first.next_actions,
                player_0.opponent(),
            );
            break;
        }

        let player_1 = env.current_player();
        let Some(action_1) =
            learner.choose_action(player_1, &first.next_state, &first.next_actions)
        else {
            // The reply never happened, so the first mover keeps its own reward.
            learner.update_value(
                player_0,
                &state_0,
                action_0,
                first.reward,
                &first.next_state,
                &first.next_actions,
                player_0.opponent(),
            );
            break;
        };

        let second = env.step(action_1)?;
        let reward_0 = if env.is_won() {
            LOSS_REWARD
        } else {
            first.reward
        };

        // player_0 must bootstrap from player_1's table before it changes.
        learner.update_value(
            player_0,
            &state_0,
            action_0,
            reward_0,
            &first.next_state,
            &first.next_actions,
            player_0.opponent(),
        );
        learner.update_value(
            player_1,
            &first.next_state,
            action_1,
            second.reward,
            &second.next_state,
            &second.next_actions,
            player_1.opponent(),
        );
    }

    Ok(env.outcome().unwrap_or(GameOutcome::Draw))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        q_learning::{AgentConfig, QAgent},
        tictactoe::{Board, WIN_REWARD},
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Update {
        player: Player,
        state: Board,
        action: usize,
        reward: f64,
        next_actions: Vec<usize>,
        opponent: Player,
    }

    /// Plays a fixed script; `None` entries decline to move.
    struct ScriptedLearner {
        script: VecDeque<Option<usize>>,
        updates: Vec<Update>,
    }

    impl ScriptedLearner {
        fn new(script: &[Option<usize>]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                updates: Vec::new(),
            }
        }
    }

    impl SelfPlayLearner for ScriptedLearner {
        fn choose_action(&mut self, _: Player, _: &Board, actions: &[usize]) -> Option<usize> {
            let next = self.script.pop_front().flatten();
            if let Some(action) = next {
                assert!(actions.contains(&action), "script action {action} unavailable");
            }
            next
        }

        fn update_value(
            &mut self,
            player: Player,
            state: &Board,
            action: usize,
            reward: f64,
            _next_state: &Board,
            next_actions: &[usize],
            opponent: Player,
        ) {
            self.updates.push(Update {
                player,
                state: state.clone(),
                action,
                reward,
                next_actions: next_actions.to_vec(),
                opponent,
            });
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn scripted(moves: &[usize]) -> ScriptedLearner {
        let script: Vec<Option<usize>> = moves.iter().map(|&m| Some(m)).collect();
        ScriptedLearner::new(&script)
    }

    #[test]
    fn test_winning_reply_patches_first_mover_reward() {
        // X: 0, O: 3, X: 1, O: 4, X: 8, O: 5 -> O completes the middle row
        let mut env = Environment::default();
        let mut learner = scripted(&[0, 3, 1, 4, 8, 5]);

        let outcome = play_episode(&mut env, &mut learner).unwrap();
        assert_eq!(outcome, GameOutcome::Win(Player::O));

        let updates = &learner.updates;
        assert_eq!(updates.len(), 6);

        let x_last = &updates[4];
        assert_eq!(x_last.player, Player::X);
        assert_eq!(x_last.action, 8);
        assert_eq!(x_last.reward, LOSS_REWARD);
        assert_eq!(x_last.opponent, Player::O);

        let o_last = &updates[5];
        assert_eq!(o_last.player, Player::O);
        assert_eq!(o_last.action, 5);
        assert_eq!(o_last.reward, WIN_REWARD);
        assert_eq!(o_last.opponent, Player::X);

        assert!(updates[..4].iter().all(|u| u.reward == 0.0));
    }

    #[test]
    fn test_first_mover_win_updates_only_winner() {
        // X: 0, O: 4, X: 1, O: 5, X: 2 -> X completes the top row on a first ply
        let mut env = Environment::default();
        let mut learner = scripted(&[0, 4, 1, 5, 2]);

        let outcome = play_episode(&mut env, &mut learner).unwrap();
        assert_eq!(outcome, GameOutcome::Win(Player::X));

        let updates = &learner.updates;
        assert_eq!(updates.len(), 5);
        let last = updates.last().unwrap();
        assert_eq!(last.player, Player::X);
        assert_eq!(last.action, 2);
        assert_eq!(last.reward, WIN_REWARD);
        assert_eq!(last.next_actions, vec![3, 6, 7, 8]);
    }

    #[test]
    fn test_draw_rewards_last_mover() {
        let mut env = Environment::default();
        let mut learner = scripted(&[0, 1, 2, 3, 5, 4, 6, 8, 7]);

        let outcome = play_episode(&mut env, &mut learner).unwrap();
        assert_eq!(outcome, GameOutcome::Draw);

        let last = learner.updates.last().unwrap();
        assert_eq!(last.player, Player::X);
        assert_eq!(last.action, 7);
        assert_eq!(last.reward, crate::tictactoe::DRAW_REWARD);
        assert!(last.next_actions.is_empty());
        assert_eq!(learner.updates.len(), 9);
    }

    #[test]
    fn test_missing_reply_keeps_original_reward_and_ends_episode() {
        let mut env = Environment::default();
        let mut learner = ScriptedLearner::new(&[Some(4), None, Some(0)]);

        let outcome = play_episode(&mut env, &mut learner).unwrap();
        assert_eq!(outcome, GameOutcome::Draw);

        assert_eq!(learner.updates.len(), 1);
        let update = &learner.updates[0];
        assert_eq!(update.player, Player::X);
        assert_eq!(update.state, Board::new(3));
        assert_eq!(update.action, 4);
        assert_eq!(update.reward, 0.0);
        assert_eq!(update.opponent, Player::O);
        // The remaining scripted move was never requested
        assert_eq!(learner.script.len(), 1);
    }

    #[test]
    fn test_no_first_action_ends_without_update() {
        let mut env = Environment::default();
        let mut learner = ScriptedLearner::new(&[None]);

        let outcome = play_episode(&mut env, &mut learner).unwrap();
        assert_eq!(outcome, GameOutcome::Draw);
        assert!(learner.updates.is_empty());
        assert_eq!(env.turns(), 0);
    }

    #[test]
    fn test_trainer_counts_every_episode() {
        let config = TrainingConfig {
            episodes: 200,
            board_size: 3,
            seed: Some(42),
        };
        let mut agent = QAgent::new(AgentConfig::default()).unwrap();
        let mut trainer = SelfPlayTrainer::new(config);

        let result = trainer.run(&mut agent).unwrap();

        assert_eq!(result.episodes, 200);
        assert_eq!(result.x_wins + result.o_wins + result.draws, 200);
        let (x_entries, o_entries) = agent.table_sizes();
        assert!(x_entries > 0);
        assert!(o_entries > 0);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let config = TrainingConfig {
            episodes: 100,
            board_size: 3,
            seed: Some(7),
        };
        let mut first = QAgent::new(AgentConfig::default()).unwrap();
        let mut second = QAgent::new(AgentConfig::default()).unwrap();

        let a = SelfPlayTrainer::new(config.clone()).run(&mut first).unwrap();
        let b = SelfPlayTrainer::new(config).run(&mut second).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.table_sizes(), second.table_sizes());
    }

    #[test]
    fn test_zero_board_size_rejected() {
        let config = TrainingConfig {
            episodes: 1,
            board_size: 0,
            seed: None,
        };
        let mut agent = QAgent::new(AgentConfig::default()).unwrap();
        assert!(SelfPlayTrainer::new(config).run(&mut agent).is_err());
    }
}
