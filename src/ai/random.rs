use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Action, GameState};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> Option<Action> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::from_seed(7);
        let state = GameState::initial();
        let legal = state.legal_actions();

        for _ in 0..100 {
            let action = agent.select_action(&state).unwrap();
            assert!(legal.contains(&action), "Action {:?} is not legal", action);
        }
    }

    #[test]
    fn test_random_agent_deterministic_with_seed() {
        let state = GameState::initial();
        let picks_a: Vec<_> = {
            let mut agent = RandomAgent::from_seed(42);
            (0..10).map(|_| agent.select_action(&state)).collect()
        };
        let picks_b: Vec<_> = {
            let mut agent = RandomAgent::from_seed(42);
            (0..10).map(|_| agent.select_action(&state)).collect()
        };
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
