//! Tabular Q-learning for two-player self-play
//!
//! Each player identity owns an independent [`QTable`]. Updates follow the
//! opponent-relative rule
//!
//! ```text
//! Q_p(s,a) ← Q_p(s,a) + α[r − γ max_a' Q_opp(s',a') − Q_p(s,a)]
//! ```
//!
//! so a strong reply for the opponent lowers the mover's estimate.
//!
//! ## Usage Example
//!
//! ```
//! use qttt::q_learning::{AgentConfig, QAgent};
//! use qttt::tictactoe::{Environment, Player};
//!
//! let mut agent = QAgent::new(AgentConfig::default()).unwrap().with_seed(42);
//! let mut env = Environment::default();
//!
//! let state = env.board().clone();
//! let actions = env.empty_positions();
//! let action = agent.choose_action(Player::X, &state, &actions).unwrap();
//! let step = env.step(action).unwrap();
//! agent.update_value(
//!     Player::X,
//!     &state,
//!     action,
//!     step.reward,
//!     &step.next_state,
//!     &step.next_actions,
//!     Player::O,
//! );
//! ```

pub mod agent;
pub mod q_table;

pub use agent::{AgentConfig, QAgent};
pub use q_table::QTable;
