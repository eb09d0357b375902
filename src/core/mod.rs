//! Core engine types: players, state, phases, RNG, configuration, errors.
//!
//! This module contains the building blocks the rules and the orchestrator
//! share. Nothing in here talks to a decision provider or a sink.

pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use error::{GameError, ProviderError, SinkError};
pub use phase::Phase;
pub use player::{Player, PlayerId, Roster};
pub use rng::GameRng;
pub use state::{GameState, WitchInventory};
