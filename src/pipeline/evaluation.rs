//! Greedy evaluation of a trained agent against a uniformly random opponent

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::QAgent,
    tictactoe::{DEFAULT_BOARD_SIZE, Environment, Player},
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,

    /// Board edge length
    pub board_size: usize,

    /// Seed for the random opponent and identity draws
    pub seed: Option<u64>,

    /// Identity played by the random opponent; drawn per game when `None`
    pub random_player: Option<Player>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            board_size: DEFAULT_BOARD_SIZE,
            seed: None,
            random_player: None,
        }
    }
}

/// Tallies from the agent's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub total_games: usize,
}

impl EvaluationResult {
    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }
}

/// Play `config.games` games of the agent against a random mover.
///
/// The agent's ε is forced to `0.0` and stays there afterwards. X always
/// moves first; which identity the random opponent takes is drawn uniformly
/// per game unless pinned by `config.random_player`.
///
/// # Errors
///
/// Fails on an invalid board size.
pub fn evaluate_against_random(
    agent: &mut QAgent,
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    agent.set_epsilon(0.0)?;

    tracing::info!(
        games = config.games,
        random_player = ?config.random_player,
        "evaluating against random opponent"
    );

    let mut result = EvaluationResult::default();
    for game in 0..config.games {
        let mut env = Environment::new(config.board_size)?;
        let random_player = match config.random_player {
            Some(player) => player,
            None => *Player::ALL.choose(&mut rng).unwrap_or(&Player::X),
        };

        while !env.is_terminal() {
            let actions = env.empty_positions();
            if actions.is_empty() {
                result.ties += 1;
                break;
            }

            let mover = env.current_player();
            let action = if mover == random_player {
                actions.choose(&mut rng).copied()
            } else {
                agent.choose_action(mover, env.board(), &actions)
            };
            if let Some(action) = action {
                env.apply_move(action)?;
            }

            if env.check_winner() {
                if mover == random_player {
                    result.losses += 1;
                } else {
                    result.wins += 1;
                }
            }
            env.switch_turn();
        }

        result.total_games += 1;
        tracing::debug!(game, ?random_player, outcome = ?env.outcome(), "evaluation game finished");
    }

    tracing::info!(
        wins = result.wins,
        losses = result.losses,
        ties = result.ties,
        "evaluation finished"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::{SelfPlayTrainer, TrainingConfig},
        q_learning::AgentConfig,
    };

    fn untrained_agent() -> QAgent {
        QAgent::new(AgentConfig::default()).unwrap().with_seed(3)
    }

    #[test]
    fn test_every_game_is_counted_once() {
        let mut agent = untrained_agent();
        let config = EvaluationConfig {
            games: 150,
            seed: Some(11),
            ..EvaluationConfig::default()
        };

        let result = evaluate_against_random(&mut agent, &config).unwrap();

        assert_eq!(result.total_games, 150);
        assert_eq!(result.wins + result.losses + result.ties, 150);
        assert_eq!(agent.epsilon(), 0.0);
    }

    #[test]
    fn test_untrained_agent_against_random_first_mover() {
        let mut agent = untrained_agent();
        let config = EvaluationConfig {
            games: 400,
            seed: Some(5),
            random_player: Some(Player::X),
            ..EvaluationConfig::default()
        };

        let result = evaluate_against_random(&mut agent, &config).unwrap();

        assert_eq!(result.wins + result.losses + result.ties, 400);
        // An all-zero greedy O always takes the lowest free cell; a random X
        // moving first beats it often, but not always.
        assert!(result.losses > 0);
        assert!(result.wins + result.ties > 0);
    }

    #[test]
    fn test_evaluation_does_not_learn() {
        let mut agent = untrained_agent();
        let config = EvaluationConfig {
            games: 20,
            seed: Some(1),
            ..EvaluationConfig::default()
        };
        evaluate_against_random(&mut agent, &config).unwrap();
        assert_eq!(agent.table_sizes(), (0, 0));
    }

    #[test]
    fn test_seeded_evaluation_is_reproducible() {
        let config = EvaluationConfig {
            games: 50,
            seed: Some(99),
            ..EvaluationConfig::default()
        };
        let a = evaluate_against_random(&mut untrained_agent(), &config).unwrap();
        let b = evaluate_against_random(&mut untrained_agent(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trained_agent_rarely_loses_to_random() {
        let mut agent = QAgent::new(AgentConfig::default()).unwrap();
        SelfPlayTrainer::new(TrainingConfig {
            episodes: 20_000,
            board_size: 3,
            seed: Some(2024),
        })
        .run(&mut agent)
        .unwrap();

        let result = evaluate_against_random(
            &mut agent,
            &EvaluationConfig {
                games: 200,
                seed: Some(8),
                ..EvaluationConfig::default()
            },
        )
        .unwrap();

        assert_eq!(result.total_games, 200);
        assert!(
            result.wins + result.ties > result.losses,
            "trained agent lost too often: {result:?}"
        );
    }
}
