//! Error types.
//!
//! Rule violations by players (wrong turn, illegal card, ...) are *not*
//! errors: they come back as a [`PlayState`](crate::rules::PlayState) in an
//! ordinary response. The types here cover the two remaining cases:
//!
//! - `ParseError`: bad input to a `FromStr` implementation
//! - `EngineError`: broken internal bookkeeping, i.e. an engine bug

use thiserror::Error;

use super::handle::CardHandle;
use crate::rules::{GameInput, GameState};
use crate::zones::ZoneKind;

/// Errors from parsing user-facing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown ruleset {0:?}")]
    UnknownRuleset(String),
    #[error("unknown color {0:?}")]
    UnknownColor(String),
}

/// An invariant of the engine does not hold.
///
/// Seeing one of these means the engine itself is wrong; the session that
/// produced it should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{card} is already in the {zone}")]
    DuplicateCard { card: CardHandle, zone: ZoneKind },

    #[error("{card} is not in the {zone}")]
    CardNotInZone { card: CardHandle, zone: ZoneKind },

    #[error("input {input:?} is not legal in state {state:?}")]
    IllegalTransition { state: GameState, input: GameInput },

    #[error("{found} cards on the table, expected {expected}")]
    ConservationViolated { found: usize, expected: usize },

    #[error("{0} is present in more than one zone")]
    CardInTwoZones(CardHandle),

    #[error("current card has no color outside a color choice")]
    UncoloredCurrentCard,

    #[error("turn cursor {index} is out of range for {players} players")]
    CursorOutOfRange { index: usize, players: usize },

    #[error("no card on the table during a game")]
    NoCurrentCard,

    #[error("draw pile ran out while dealing")]
    EmptyDrawPile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::UnknownColor("purple".into()).to_string(),
            "unknown color \"purple\""
        );
        assert_eq!(
            ParseError::UnknownRuleset("speed".into()).to_string(),
            "unknown ruleset \"speed\""
        );
    }

    #[test]
    fn test_engine_error_messages() {
        let err = EngineError::CardNotInZone {
            card: CardHandle(3),
            zone: ZoneKind::DrawPile,
        };
        assert_eq!(err.to_string(), "Card#3 is not in the draw pile");

        let err = EngineError::IllegalTransition {
            state: GameState::Ended,
            input: GameInput::ColorChosen,
        };
        assert_eq!(
            err.to_string(),
            "input ColorChosen is not legal in state Ended"
        );
    }
}
