//! # rust-uno
//!
//! A turn-based engine for Uno-style shedding card games, built to sit
//! behind a chat bot.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: No I/O, no text rendering. Operations return typed
//!    responses; the chat layer turns them into messages.
//!
//! 2. **Card identity**: The 108 physical cards live in an arena and move
//!    between zones by handle, so two red 7s are never confused.
//!
//! 3. **Explicit turn states**: A small state machine decides which
//!    operations are legal; illegal plays are answered, not panicked on.
//!
//! ## Modules
//!
//! - `core`: Card handles, RNG, configuration, errors
//! - `cards`: Card faces, colors, effects, the card arena, shorthand codes
//! - `zones`: Ordered card zones (draw pile, discard pile, hands)
//! - `rules`: Turn state machine and response types
//! - `session`: Players, turn order and the `Session` orchestrator

pub mod cards;
pub mod core;
pub mod rules;
pub mod session;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CardHandle, EngineError, GameRng, ParseError, Ruleset, SessionConfig, StartOptions,
};

pub use crate::cards::{
    canonical_code, split_tokens, Attribute, Attributes, Card, CardArena, Color, DECK_SIZE,
};

pub use crate::zones::{Deck, ZoneKind};

pub use crate::rules::{
    CardRef, GameInput, GameState, JoinOutcome, Outcome, PlayState, Response, ScoreEntry,
    TableSummary, TurnMachine,
};

pub use crate::session::{Player, Session, SessionBuilder};
