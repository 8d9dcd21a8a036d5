//! Zone system for card locations.
//!
//! Every card of a session is in exactly one zone at a time: the draw
//! pile, the discard pile, a player's hand, or face-up as the current card.
//!
//! ## Key Types
//!
//! - `Deck`: Ordered handles plus a shorthand index
//! - `ZoneKind`: What a deck is used for

pub mod deck;

pub use deck::{Deck, ZoneKind};
