//! Game sessions.
//!
//! ## Key Types
//!
//! - `Session`: One game at one table; the public entry point
//! - `Player`: A seated participant and their hand
//! - `TurnCursor`: Whose turn it is, as a seat index
//! - `SessionBuilder`: Seats players and fixes hands for reproducible games

pub mod builder;
pub mod cursor;
pub mod engine;
pub mod player;

pub use builder::SessionBuilder;
pub use cursor::TurnCursor;
pub use engine::Session;
pub use player::{PlayCheck, Player};
