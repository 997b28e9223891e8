//! Q-table for one player identity

use std::collections::HashMap;

use crate::tictactoe::Board;

/// Q-table mapping (board snapshot, action) pairs to Q-values
///
/// Entries are only created by [`QTable::set`]; reads of unseen pairs go
/// through [`QTable::get_or_default`] and never grow the table.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    q_values: HashMap<(Board, usize), f64>,
}

impl QTable {
    /// Value assumed for an unseen state-action pair
    pub const DEFAULT_VALUE: f64 = 0.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Q-value for a state-action pair, [`QTable::DEFAULT_VALUE`] if unseen
    pub fn get_or_default(&self, state: &Board, action: usize) -> f64 {
        // Keyed by owned snapshots; probing needs one too.
        self.q_values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(Self::DEFAULT_VALUE)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Board, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    pub fn contains(&self, state: &Board, action: usize) -> bool {
        self.q_values.contains_key(&(state.clone(), action))
    }

    /// Maximum Q-value over `actions` in `state`, `0.0` when `actions` is empty
    pub fn max_q(&self, state: &Board, actions: &[usize]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get_or_default(state, action))
            .reduce(f64::max)
            .unwrap_or(Self::DEFAULT_VALUE)
    }

    /// Highest-valued action, ties going to the earliest entry in `actions`
    pub fn greedy_action(&self, state: &Board, actions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &action in actions {
            let q = self.get_or_default(state, action);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
