//! Self-play Q-learning agent
//!
//! The agent keeps one [`QTable`] per player identity and learns both sides
//! of the game at once. Its update bootstraps from the *opponent's* best
//! next-state value and subtracts it: whatever is good for the player about
//! to move next is bad for the player who just moved.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::SelfPlayLearner,
    q_learning::q_table::QTable,
    tictactoe::{Board, Player},
};

/// Hyperparameters fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration probability ε
    pub epsilon: f64,
}

impl AgentConfig {
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check parameter ranges: α in (0, 1], γ and ε in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                "learning rate",
                self.learning_rate,
                self.learning_rate > 0.0 && self.learning_rate <= 1.0,
            ),
            (
                "discount factor",
                self.discount_factor,
                (0.0..=1.0).contains(&self.discount_factor),
            ),
            (
                "epsilon",
                self.epsilon,
                (0.0..=1.0).contains(&self.epsilon),
            ),
        ];
        for (name, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} is out of range"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(0.1, 0.9, 0.2)
    }
}

/// Tabular Q-learning agent holding independent tables for X and O
#[derive(Debug, Clone)]
pub struct QAgent {
    config: AgentConfig,
    x_table: QTable,
    o_table: QTable,
    rng: StdRng,
}

impl QAgent {
    /// Create an agent with empty tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`AgentConfig::validate`].
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            x_table: QTable::new(),
            o_table: QTable::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    /// Override ε; `0.0` turns [`QAgent::choose_action`] purely greedy.
    ///
    /// # Errors
    ///
    /// Rejects values the config would reject, leaving ε unchanged.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.config.with_epsilon(epsilon).validate()?;
        self.config.epsilon = epsilon;
        Ok(())
    }

    pub fn table(&self, player: Player) -> &QTable {
        match player {
            Player::X => &self.x_table,
            Player::O => &self.o_table,
        }
    }

    fn table_mut(&mut self, player: Player) -> &mut QTable {
        match player {
            Player::X => &mut self.x_table,
            Player::O => &mut self.o_table,
        }
    }

    /// Q-value of `action` in `state` from `player`'s table, `0.0` if unseen
    pub fn value_of(&self, player: Player, state: &Board, action: usize) -> f64 {
        self.table(player).get_or_default(state, action)
    }

    /// ε-greedy selection; `None` when `actions` is empty
    pub fn choose_action(
        &mut self,
        player: Player,
        state: &Board,
        actions: &[usize],
    ) -> Option<usize> {
        if actions.is_empty() {
            return None;
        }
        if self.rng.random::<f64>() < self.config.epsilon {
            actions.choose(&mut self.rng).copied()
        } else {
            self.table(player).greedy_action(state, actions)
        }
    }

    /// Opponent-relative TD update.
    ///
    /// Q(s,a) ← Q(s,a) + α[r − γ max_a' Q_opp(s',a') − Q(s,a)]
    ///
    /// The max runs over the opponent's table and is `0.0` when
    /// `next_actions` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn update_value(
        &mut self,
        player: Player,
        state: &Board,
        action: usize,
        reward: f64,
        next_state: &Board,
        next_actions: &[usize],
        opponent: Player,
    ) {
        let current_q = self.value_of(player, state, action);
        let best_opponent_q = self.table(opponent).max_q(next_state, next_actions);
        let td_target = reward - self.config.discount_factor * best_opponent_q;
        let new_q = current_q + self.config.learning_rate * (td_target - current_q);
        self.table_mut(player).set(state.clone(), action, new_q);
    }

    /// Number of stored entries in each player's table
    pub fn table_sizes(&self) -> (usize, usize) {
        (self.x_table.len(), self.o_table.len())
    }
}

impl SelfPlayLearner for QAgent {
    fn choose_action(
        &mut self,
        player: Player,
        state: &Board,
        actions: &[usize],
    ) -> Option<usize> {
        QAgent::choose_action(self, player, state, actions)
    }

    fn update_value(
        &mut self,
        player: Player,
        state: &Board,
        action: usize,
        reward: f64,
        next_state: &Board,
        next_actions: &[usize],
        opponent: Player,
    ) {
        QAgent::update_value(
            self,
            player,
            state,
            action,
            reward,
            next_state,
            next_actions,
            opponent,
        );
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
