//! Core engine types: card handles, RNG, configuration, errors.
//!
//! This module contains the building blocks that know nothing about card
//! faces or turn rules. The rest of the crate is built on top of them.

pub mod config;
pub mod error;
pub mod handle;
pub mod rng;

pub use config::{
    Ruleset, SessionConfig, StartOptions, DEFAULT_HAND_SIZE, DEFAULT_SCOREBOARD_SIZE,
    MAX_PLAYERS, MIN_PLAYERS,
};
pub use error::{EngineError, ParseError};
pub use handle::CardHandle;
pub use rng::GameRng;
