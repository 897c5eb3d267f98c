//! # ML Morris
//!
//! A Morabaraba-style mill board game (24 intersections, 16 mill lines,
//! 12 pieces per side) with reinforcement-learning self-play agents:
//! tabular Q-learning and a deep Q-network with experience replay and a
//! target network, built on the Burn ML framework.
//!
//! ## Modules
//!
//! - [`game`] — Core rules: board topology, phase state machine, legality
//! - [`ai`] — Agent trait, random/tabular/DQN agents, state encoding
//! - [`training`] — Episode orchestration, replay buffer, trainer, metrics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

#![recursion_limit = "256"]

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
