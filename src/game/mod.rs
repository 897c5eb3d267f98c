//! Core mill-game logic: static board topology, piece ownership, player
//! types, and the phase-structured game state machine with immutable
//! transitions.

mod board;
mod player;
mod state;
pub mod topology;

pub use board::{Board, Cell};
pub use player::Player;
pub use state::{Action, ActionError, GameState, Phase, PIECES_PER_SIDE};
pub use topology::{Position, MILL_COUNT, POSITION_COUNT};
