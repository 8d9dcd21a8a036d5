//! Card system: faces, colors, effects and the card arena.
//!
//! ## Key Types
//!
//! - `Color`: The four suit colors
//! - `Attribute` / `Attributes`: Effect flags and the closed set of
//!   combinations found in a deck
//! - `Card`: One card face (color, rank, points, effects)
//! - `CardArena`: The 108 physical cards of a session, addressed by
//!   [`CardHandle`](crate::core::CardHandle)
//!
//! Shorthand parsing (`canonical_code`, `split_tokens`) lives here too,
//! since codes are derived from card faces.

pub mod attributes;
pub mod card;
pub mod color;
pub mod registry;
pub mod shorthand;

pub use attributes::{Attribute, Attributes};
pub use card::{Card, ACTION_POINTS, WILD_POINTS};
pub use color::Color;
pub use registry::{CardArena, DECK_SIZE};
pub use shorthand::{canonical_code, split_tokens};
