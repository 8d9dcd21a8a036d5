//! Turn cursor.
//!
//! Tracks whose turn it is as an index into the seat list, and yields the
//! `(current, next)` pair the session reports after every operation. The
//! seat list itself lives in the session; the cursor is told about every
//! change to it (reverse, removal) and re-anchors accordingly.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// Circular cursor over the seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    current: usize,
}

impl TurnCursor {
    /// A cursor on the first seat.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the player after the current one.
    #[must_use]
    pub fn next(&self, seats: usize) -> usize {
        if seats == 0 {
            0
        } else {
            (self.current + 1) % seats
        }
    }

    /// The `(current, next)` pair.
    #[must_use]
    pub fn pair(&self, seats: usize) -> (usize, usize) {
        (self.current, self.next(seats))
    }

    /// Move the turn forward by `steps` seats.
    pub fn advance(&mut self, steps: usize, seats: usize) {
        if seats > 0 {
            self.current = (self.current + steps) % seats;
        }
    }

    /// Point at a specific seat.
    pub fn set(&mut self, index: usize) {
        self.current = index;
    }

    /// Follow the current player after the seat list was reversed.
    pub fn reversed(&mut self, seats: usize) {
        if seats > 0 {
            self.current = seats - 1 - self.current;
        }
    }

    /// Re-anchor after the seat at `removed` was taken out of a list that
    /// now holds `seats` players.
    ///
    /// Returns `true` if the removed player held the turn, in which case
    /// the turn passes to the player who sat after them.
    pub fn removed(&mut self, removed: usize, seats: usize) -> bool {
        if seats == 0 {
            self.current = 0;
            return false;
        }
        let held_turn = removed == self.current;
        if removed < self.current {
            self.current -= 1;
        } else if held_turn {
            self.current %= seats;
        }
        held_turn
    }

    /// Check that the cursor points at an existing seat.
    pub fn validate(&self, seats: usize) -> Result<(), EngineError> {
        if self.current < seats {
            Ok(())
        } else {
            Err(EngineError::CursorOutOfRange {
                index: self.current,
                players: seats,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let mut cursor = TurnCursor::new();
        assert_eq!(cursor.pair(3), (0, 1));

        cursor.advance(1, 3);
        assert_eq!(cursor.pair(3), (1, 2));

        cursor.advance(2, 3);
        assert_eq!(cursor.pair(3), (0, 1));

        cursor.set(2);
        assert_eq!(cursor.pair(3), (2, 0));
    }

    #[test]
    fn test_two_seats_skip_returns_to_actor() {
        let mut cursor = TurnCursor::new();
        cursor.advance(2, 2);
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn test_reversed_follows_player() {
        // Seats [a, b, c, d], turn at c; reversed list [d, c, b, a]
        let mut cursor = TurnCursor::new();
        cursor.set(2);
        cursor.reversed(4);
        assert_eq!(cursor.current(), 1);
        // Next player in the new order is b
        assert_eq!(cursor.next(4), 2);
    }

    #[test]
    fn test_removed_before_current() {
        let mut cursor = TurnCursor::new();
        cursor.set(2);
        assert!(!cursor.removed(0, 3));
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn test_removed_after_current() {
        let mut cursor = TurnCursor::new();
        cursor.set(1);
        assert!(!cursor.removed(3, 3));
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn test_removed_current_passes_turn() {
        // Seats [a, b, c], turn at c; c leaves, turn wraps to a
        let mut cursor = TurnCursor::new();
        cursor.set(2);
        assert!(cursor.removed(2, 2));
        assert_eq!(cursor.current(), 0);

        // Seats [a, b, c], turn at a; a leaves, b (now index 0) plays
        let mut cursor = TurnCursor::new();
        assert!(cursor.removed(0, 2));
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn test_validate() {
        let mut cursor = TurnCursor::new();
        assert!(cursor.validate(2).is_ok());
        cursor.set(2);
        assert_eq!(
            cursor.validate(2),
            Err(EngineError::CursorOutOfRange {
                index: 2,
                players: 2
            })
        );
    }
}
