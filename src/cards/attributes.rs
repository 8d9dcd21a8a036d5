//! Card effect attributes.
//!
//! A card carries a combination of four effect flags. Only a handful of
//! combinations exist in a real deck, so the combination is a closed enum
//! (`Attributes`) that the session matches exhaustively, while `Attribute`
//! names a single flag for queries.
//!
//! | Card         | Classic        | No-skip     |
//! |--------------|----------------|-------------|
//! | numeral      | `Plain`        | `Plain`     |
//! | skip         | `Skip`         | `Skip`      |
//! | reverse      | `Reverse`      | `Reverse`   |
//! | wild         | `Wild`         | `Wild`      |
//! | +2           | `DrawSkip`     | `Draw`      |
//! | wild +4      | `WildDrawSkip` | `WildDraw`  |

use serde::{Deserialize, Serialize};

use crate::core::Ruleset;

/// A single effect flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Reverses the seat order.
    Reverse,
    /// The affected player loses their turn.
    Skip,
    /// The player chooses the card's color.
    ColorChange,
    /// The affected player draws `rank` cards.
    PickCards,
}

/// The effect combination of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attributes {
    /// No effect (numeral cards).
    #[default]
    Plain,
    Skip,
    Reverse,
    Wild,
    /// PickCards
    Draw,
    /// PickCards + Skip
    DrawSkip,
    /// ColorChange + PickCards
    WildDraw,
    /// ColorChange + PickCards + Skip
    WildDrawSkip,
}

impl Attributes {
    /// The draw-two combination for a ruleset.
    #[must_use]
    pub const fn draw_two(ruleset: Ruleset) -> Self {
        if ruleset.draw_cards_skip() {
            Attributes::DrawSkip
        } else {
            Attributes::Draw
        }
    }

    /// The wild-draw-four combination for a ruleset.
    #[must_use]
    pub const fn wild_draw_four(ruleset: Ruleset) -> Self {
        if ruleset.draw_cards_skip() {
            Attributes::WildDrawSkip
        } else {
            Attributes::WildDraw
        }
    }

    /// Does this combination include `flag`?
    #[must_use]
    pub const fn contains(self, flag: Attribute) -> bool {
        use Attributes::*;
        match flag {
            Attribute::Reverse => matches!(self, Reverse),
            Attribute::Skip => matches!(self, Skip | DrawSkip | WildDrawSkip),
            Attribute::ColorChange => matches!(self, Wild | WildDraw | WildDrawSkip),
            Attribute::PickCards => matches!(self, Draw | DrawSkip | WildDraw | WildDrawSkip),
        }
    }

    /// True for numeral cards.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Attributes::Plain)
    }
}
