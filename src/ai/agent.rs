use crate::game::{Action, GameState, Player};

/// A single step of experience for RL training. The action is a position
/// index into the canonical ordering (placement actions only; movement is
/// not learned by the deep agent).
#[derive(Debug, Clone)]
pub struct Experience {
    pub state: GameState,
    pub action: usize,
    pub reward: f32,
    pub next_state: GameState,
    pub done: bool,
    pub player: Player,
}

/// Universal interface for all game-playing agents.
///
/// The contract mirrors the turn loop: the orchestrator asks for an
/// action, applies it through the engine, and feeds the resulting reward
/// back with `record_outcome`. The reward attaches to the agent's most
/// recent own selection; calling `record_outcome` without a preceding
/// `select_action` is a no-op. Learning updates mutate only the agent's
/// own parameters, never the game state.
pub trait Agent {
    /// Select a legal action for the side to move, or `None` when the
    /// phase offers no actions. Deterministic given a fixed seed and
    /// fixed learned parameters, apart from the exploration draw.
    fn select_action(&mut self, state: &GameState) -> Option<Action>;

    /// Attach a reward (and possibly terminal successor state) to the
    /// most recently selected action, triggering the agent's own
    /// learning update.
    fn record_outcome(&mut self, _reward: f32, _next_state: &GameState, _done: bool) {}

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Current exploration rate, 0.0 for non-exploring agents.
    fn exploration_rate(&self) -> f32 {
        0.0
    }

    /// Override the exploration rate (e.g. 0.0 for greedy evaluation).
    fn set_exploration_rate(&mut self, _epsilon: f32) {}
}
