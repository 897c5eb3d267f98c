use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Action, GameState, Phase, Player, POSITION_COUNT};

use super::agent::Agent;
use super::state_encoding::encode_key;

/// Tabular Q-learning hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TabularConfig {
    pub alpha: f32,
    pub gamma: f32,
    pub epsilon: f32,
}

impl Default for TabularConfig {
    fn default() -> Self {
        TabularConfig {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.2,
        }
    }
}

/// Board encoding plus phase: the lookup key for the sparse Q-table.
type StateKey = ([i8; POSITION_COUNT], Phase);

/// Classic one-step Q-learning over a sparse table keyed by
/// (board-encoding, phase), with unseen entries defaulting to 0.
/// Learns both placement and movement actions; unbounded table growth is
/// expected and acceptable.
pub struct TabularQAgent {
    player: Player,
    config: TabularConfig,
    epsilon: f32,
    q_table: HashMap<StateKey, HashMap<Action, f32>>,
    last: Option<(StateKey, Action)>,
    rng: StdRng,
}

impl TabularQAgent {
    pub fn new(player: Player, config: TabularConfig) -> Self {
        Self::with_rng(player, config, StdRng::from_os_rng())
    }

    pub fn from_seed(player: Player, config: TabularConfig, seed: u64) -> Self {
        Self::with_rng(player, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(player: Player, config: TabularConfig, rng: StdRng) -> Self {
        let epsilon = config.epsilon;
        TabularQAgent {
            player,
            config,
            epsilon,
            q_table: HashMap::new(),
            last: None,
            rng,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Number of distinct (state, phase) keys seen so far.
    pub fn table_size(&self) -> usize {
        self.q_table.len()
    }

    /// Stored value for a (state, action) pair, 0 when unseen.
    pub fn q_value(&self, state: &GameState, action: Action) -> f32 {
        let key = (encode_key(state, self.player), state.phase());
        self.q_table
            .get(&key)
            .and_then(|m| m.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Greedy pick over `actions`: highest stored value, unseen entries
    /// 0, ties broken by the first action in enumeration order.
    fn best_action(&self, key: &StateKey, actions: &[Action]) -> Action {
        let values = self.q_table.get(key);
        let mut best = actions[0];
        let mut best_val = f32::NEG_INFINITY;
        for &action in actions {
            let val = values
                .and_then(|m| m.get(&action))
                .copied()
                .unwrap_or(0.0);
            if val > best_val {
                best_val = val;
                best = action;
            }
        }
        best
    }

    /// Best achievable value at `state` over the agent's own legal
    /// placement/movement actions, 0 when there are none.
    fn max_next_value(&self, state: &GameState) -> f32 {
        let actions = state.legal_actions_for(self.player);
        if actions.is_empty() {
            return 0.0;
        }
        let key = (encode_key(state, self.player), state.phase());
        let values = self.q_table.get(&key);
        actions
            .iter()
            .map(|a| values.and_then(|m| m.get(a)).copied().unwrap_or(0.0))
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

impl Agent for TabularQAgent {
    fn select_action(&mut self, state: &GameState) -> Option<Action> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return None;
        }
        // Removal is not part of the learned policy: fall back to a
        // uniform draw and leave the last-selection anchor untouched.
        if state.phase() == Phase::Removal {
            let idx = self.rng.random_range(0..actions.len());
            return Some(actions[idx]);
        }

        let key = (encode_key(state, self.player), state.phase());
        let action = if self.rng.random_range(0.0..1.0) < self.epsilon {
            actions[self.rng.random_range(0..actions.len())]
        } else {
            self.best_action(&key, &actions)
        };
        self.last = Some((key, action));
        Some(action)
    }

    fn record_outcome(&mut self, reward: f32, next_state: &GameState, done: bool) {
        let Some((key, action)) = self.last else {
            return;
        };
        let bootstrap = if done {
            0.0
        } else {
            self.config.gamma * self.max_next_value(next_state)
        };
        let entry = self
            .q_table
            .entry(key)
            .or_default()
            .entry(action)
            .or_insert(0.0);
        *entry += self.config.alpha * (reward + bootstrap - *entry);
        if done {
            self.last = None;
        }
    }

    fn name(&self) -> &str {
        "TabularQ"
    }

    fn exploration_rate(&self) -> f32 {
        self.epsilon
    }

    fn set_exploration_rate(&mut self, epsilon: f32) {
        self.epsilon = epsilon;
    }
}
