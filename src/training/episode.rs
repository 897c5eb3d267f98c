use rand::rngs::StdRng;
use rand::Rng;

use crate::ai::{Agent, RandomAgent};
use crate::error::TrainingError;
use crate::game::{Action, GameState, Phase, Player};

/// Shaping bonus per mill line where the acting side holds two of three
/// positions with the third empty, granted after each placement.
pub const MILL_SETUP_BONUS: f32 = 0.3;

/// Result of driving a single game to completion (or to a stall).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub winner: Option<Player>,
    pub game_length: usize,
    /// True when the game was cut off: either the move cap was reached
    /// or the side to move had no legal action.
    pub stalled: bool,
}

/// Drive one full game between two agents, one decision per turn.
///
/// Removal-phase decisions are policy-agnostic: an eligible opponent
/// piece is drawn uniformly by the orchestrator, not the agents. Every
/// placement and movement goes to the active side's agent, is applied
/// through the engine, and its shaping reward is fed straight back via
/// `record_outcome`. On a win both agents receive +1/-1 terminal rewards
/// anchored to their own most recent selection.
pub fn play_episode(
    red: &mut dyn Agent,
    blue: &mut dyn Agent,
    rng: &mut StdRng,
    max_moves: usize,
) -> Result<EpisodeResult, TrainingError> {
    let mut state = GameState::initial();
    let mut moves = 0;
    let mut stalled = false;

    while !state.is_terminal() {
        if moves >= max_moves {
            stalled = true;
            break;
        }

        if state.phase() == Phase::Removal {
            // Removal never has an empty action set under the rules: a
            // mill requires three own pieces, so by then the opponent has
            // placed at least two, none of which can yet form a mill.
            let removals = state.legal_actions();
            if removals.is_empty() {
                return Err(TrainingError::NoLegalAction {
                    phase: state.phase(),
                });
            }
            let action = removals[rng.random_range(0..removals.len())];
            state = apply_checked(&state, action)?;
        } else {
            let mover = state.current_player();
            let agent: &mut dyn Agent = if mover == Player::Red { red } else { blue };
            let Some(action) = agent.select_action(&state) else {
                // Blocked side: declare a stall rather than skip silently.
                stalled = true;
                break;
            };
            let next = apply_checked(&state, action)?;
            let reward = match action {
                Action::Place(_) => {
                    MILL_SETUP_BONUS * next.board().mill_threats(mover) as f32
                }
                _ => 0.0,
            };
            agent.record_outcome(reward, &next, false);
            state = next;
        }
        moves += 1;
    }

    if let Some(winner) = state.winner() {
        let (red_reward, blue_reward) = if winner == Player::Red {
            (1.0, -1.0)
        } else {
            (-1.0, 1.0)
        };
        red.record_outcome(red_reward, &state, true);
        blue.record_outcome(blue_reward, &state, true);
    }

    Ok(EpisodeResult {
        winner: state.winner(),
        game_length: moves,
        stalled,
    })
}

fn apply_checked(state: &GameState, action: Action) -> Result<GameState, TrainingError> {
    state
        .apply(action)
        .map_err(|source| TrainingError::IllegalAction {
            action,
            phase: state.phase(),
            source,
        })
}

/// Play a single evaluation game (no learning updates are delivered).
/// Returns Some(true) if the agent won, Some(false) if it lost, None on
/// a stall.
pub fn play_eval_game(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    agent_is_red: bool,
    rng: &mut StdRng,
    max_moves: usize,
) -> Result<Option<bool>, TrainingError> {
    let mut state = GameState::initial();
    let mut moves = 0;

    while !state.is_terminal() && moves < max_moves {
        if state.phase() == Phase::Removal {
            let removals = state.legal_actions();
            if removals.is_empty() {
                return Err(TrainingError::NoLegalAction {
                    phase: state.phase(),
                });
            }
            let action = removals[rng.random_range(0..removals.len())];
            state = apply_checked(&state, action)?;
        } else {
            let is_agent_turn = (state.current_player() == Player::Red) == agent_is_red;
            let active: &mut dyn Agent = if is_agent_turn { agent } else { opponent };
            let Some(action) = active.select_action(&state) else {
                break;
            };
            state = apply_checked(&state, action)?;
        }
        moves += 1;
    }

    Ok(state.winner().map(|w| (w == Player::Red) == agent_is_red))
}

/// Evaluate an agent greedily against a fresh random opponent over N
/// games, alternating sides. Exploration is disabled for the duration
/// and restored afterwards.
pub fn evaluate(
    agent: &mut dyn Agent,
    eval_games: usize,
    max_moves: usize,
    rng: &mut StdRng,
) -> Result<f32, TrainingError> {
    let mut random = RandomAgent::from_seed(rng.random());
    let saved_epsilon = agent.exploration_rate();
    agent.set_exploration_rate(0.0);

    let mut wins = 0;
    let mut result = Ok(());
    for game_idx in 0..eval_games {
        let agent_is_red = game_idx % 2 == 0;
        match play_eval_game(agent, &mut random, agent_is_red, rng, max_moves) {
            Ok(Some(true)) => wins += 1,
            Ok(_) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    agent.set_exploration_rate(saved_epsilon);
    result?;
    Ok(wins as f32 / eval_games.max(1) as f32)
}
