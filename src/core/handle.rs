//! Card identity.
//!
//! Every physical card in a session has a unique `CardHandle`: an index
//! into the session's [`CardArena`](crate::cards::CardArena).
//!
//! ## Why handles
//!
//! The standard deck holds duplicate cards (two red 7s, four wilds, ...).
//! Zones store handles rather than card values so that two equal-looking
//! cards stay distinguishable, and moving a card between zones is just
//! moving its handle.
//!
//! ```
//! use rust_uno::core::CardHandle;
//!
//! let first = CardHandle::new(0);
//! let second = CardHandle::new(1);
//!
//! assert_ne!(first, second);
//! assert_eq!(second.index(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a physical card.
///
/// Handles are allocated densely from 0 when the arena is populated, so
/// they can be used directly as vector indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardHandle(pub u16);

impl CardHandle {
    /// Create a handle from a raw index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the arena index for this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for CardHandle {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}
