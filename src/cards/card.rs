//! The card value type.
//!
//! A `Card` is the face of one physical card: color, rank, points and its
//! effect combination. Identity lives in [`CardHandle`](crate::core::CardHandle);
//! two red 7s are equal `Card`s behind different handles.
//!
//! ```
//! use rust_uno::cards::{Card, Color};
//!
//! let five = Card::numeral(Color::Red, 5);
//! let seven = Card::numeral(Color::Red, 7);
//! let blue_five = Card::numeral(Color::Blue, 5);
//!
//! assert_eq!(five.shorthand(), "r5");
//! assert!(seven.playable_over(&five));
//! assert!(blue_five.playable_over(&five));
//! assert!(!Card::numeral(Color::Blue, 7).playable_over(&five));
//! ```

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, Attributes};
use super::color::{Color, NO_COLOR_IRC_CODE};
use crate::core::Ruleset;

/// Points scored for skip, reverse and draw-two cards.
pub const ACTION_POINTS: u32 = 20;

/// Points scored for wild cards.
pub const WILD_POINTS: u32 = 50;

/// Prefix of wild card shorthands.
pub const WILD_PREFIX: char = 'j';

/// One card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// `None` for a wild card whose color has not been chosen.
    pub color: Option<Color>,
    /// Numeral value, or the number of cards drawn for draw cards.
    pub rank: u8,
    /// Points counted against the holder at the end of a game.
    pub points: u32,
    pub attributes: Attributes,
}

impl Card {
    /// A numeral card (0-9).
    #[must_use]
    pub const fn numeral(color: Color, rank: u8) -> Self {
        Self {
            color: Some(color),
            rank,
            points: rank as u32,
            attributes: Attributes::Plain,
        }
    }

    #[must_use]
    pub const fn skip(color: Color) -> Self {
        Self::action(color, 0, Attributes::Skip)
    }

    #[must_use]
    pub const fn reverse(color: Color) -> Self {
        Self::action(color, 0, Attributes::Reverse)
    }

    /// A draw-two card; whether it also skips depends on the ruleset.
    #[must_use]
    pub const fn draw_two(color: Color, ruleset: Ruleset) -> Self {
        Self::action(color, 2, Attributes::draw_two(ruleset))
    }

    #[must_use]
    pub const fn wild() -> Self {
        Self {
            color: None,
            rank: 0,
            points: WILD_POINTS,
            attributes: Attributes::Wild,
        }
    }

    /// A wild draw-four card; whether it also skips depends on the ruleset.
    #[must_use]
    pub const fn wild_draw_four(ruleset: Ruleset) -> Self {
        Self {
            color: None,
            rank: 4,
            points: WILD_POINTS,
            attributes: Attributes::wild_draw_four(ruleset),
        }
    }

    const fn action(color: Color, rank: u8, attributes: Attributes) -> Self {
        Self {
            color: Some(color),
            rank,
            points: ACTION_POINTS,
            attributes,
        }
    }

    /// The effect combination, for exhaustive matching.
    #[must_use]
    pub const fn effect(&self) -> Attributes {
        self.attributes
    }

    /// Does this card carry `flag`?
    #[must_use]
    pub const fn has(&self, flag: Attribute) -> bool {
        self.attributes.contains(flag)
    }

    /// Wild cards get their color from the player.
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        self.has(Attribute::ColorChange)
    }

    /// Canonical shorthand code (`r5`, `gs`, `br`, `y+2`, `j`, `j+4`).
    ///
    /// Wild cards keep their `j` code after a color is chosen.
    #[must_use]
    pub fn shorthand(&self) -> String {
        let prefix = match self.color {
            Some(color) if !self.is_wild() => color.letter(),
            _ => WILD_PREFIX,
        };
        match self.attributes {
            Attributes::Plain => format!("{prefix}{}", self.rank),
            Attributes::Skip => format!("{prefix}s"),
            Attributes::Reverse => format!("{prefix}r"),
            Attributes::Wild => prefix.to_string(),
            Attributes::Draw
            | Attributes::DrawSkip
            | Attributes::WildDraw
            | Attributes::WildDrawSkip => format!("{prefix}+{}", self.rank),
        }
    }

    fn plain_name(&self) -> String {
        if self.is_wild() {
            return if self.has(Attribute::PickCards) {
                format!("Wild +{}", self.rank)
            } else {
                "Wild".to_string()
            };
        }
        let color = self.color.map_or("", Color::display_name);
        match self.attributes {
            Attributes::Skip => format!("{color} Skip"),
            Attributes::Reverse => format!("{color} Reverse"),
            Attributes::Draw | Attributes::DrawSkip => format!("{color} +{}", self.rank),
            _ => format!("{color} {}", self.rank),
        }
    }

    /// Display name, optionally wrapped in mIRC color and bold codes.
    ///
    /// A colored wild shows its chosen color as background.
    #[must_use]
    pub fn name(&self, colored: bool, bold: bool) -> String {
        let name = self.plain_name();
        if !colored {
            return name;
        }
        let code = self.color.map_or(NO_COLOR_IRC_CODE, Color::irc_code);
        let b = if bold { "\x02" } else { "" };
        format!("{b}\x031,{code} \x03 {name}{b}")
    }

    /// Can this card be played on top of `current`?
    #[must_use]
    pub fn playable_over(&self, current: &Card) -> bool {
        let Some(current_color) = current.color else {
            return false;
        };
        match self.color {
            None => true,
            Some(color) if color == current_color => true,
            Some(_) => {
                let same_numeral = self.attributes.is_empty()
                    && current.attributes.is_empty()
                    && self.rank == current.rank;
                let same_special =
                    !self.attributes.is_empty() && self.attributes == current.attributes;
                same_numeral || same_special
            }
        }
    }

    /// Can this card be played together with `other` in a double play?
    #[must_use]
    pub fn combinable_with(&self, other: &Card) -> bool {
        self.color.is_some()
            && self.color == other.color
            && self.rank == other.rank
            && self.attributes.is_empty()
            && other.attributes.is_empty()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.plain_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand() {
        let classic = Ruleset::Classic;
        assert_eq!(Card::numeral(Color::Red, 0).shorthand(), "r0");
        assert_eq!(Card::skip(Color::Green).shorthand(), "gs");
        assert_eq!(Card::reverse(Color::Blue).shorthand(), "br");
        assert_eq!(Card::draw_two(Color::Yellow, classic).shorthand(), "y+2");
        assert_eq!(Card::wild().shorthand(), "j");
        assert_eq!(Card::wild_draw_four(classic).shorthand(), "j+4");
    }

    #[test]
    fn test_colored_wild_keeps_shorthand() {
        let mut wild = Card::wild_draw_four(Ruleset::NoSkip);
        wild.color = Some(Color::Red);
        assert_eq!(wild.shorthand(), "j+4");
        assert_eq!(wild.name(false, false), "Wild +4");
    }

    #[test]
    fn test_names() {
        assert_eq!(Card::numeral(Color::Red, 5).name(false, false), "Red 5");
        assert_eq!(Card::skip(Color::Blue).name(false, false), "Blue Skip");
        assert_eq!(Card::reverse(Color::Green).name(false, false), "Green Reverse");
        assert_eq!(
            Card::draw_two(Color::Yellow, Ruleset::Classic).name(false, false),
            "Yellow +2"
        );
        assert_eq!(Card::wild().name(false, false), "Wild");
        assert_eq!(Card::wild().to_string(), "Wild");
    }

    #[test]
    fn test_irc_name() {
        let card = Card::numeral(Color::Red, 5);
        assert_eq!(card.name(true, true), "\x02\x031,4 \x03 Red 5\x02");
        assert_eq!(card.name(true, false), "\x031,4 \x03 Red 5");
        assert_eq!(Card::wild().name(true, false), "\x031,0 \x03 Wild");
    }

    #[test]
    fn test_points() {
        assert_eq!(Card::numeral(Color::Red, 9).points, 9);
        assert_eq!(Card::skip(Color::Red).points, 20);
        assert_eq!(Card::draw_two(Color::Red, Ruleset::NoSkip).points, 20);
        assert_eq!(Card::wild().points, 50);
        assert_eq!(Card::wild_draw_four(Ruleset::Classic).points, 50);
    }

    #[test]
    fn test_playable_over() {
        let red5 = Card::numeral(Color::Red, 5);
        let classic = Ruleset::Classic;

        // (a) wild on any colored card
        assert!(Card::wild().playable_over(&red5));
        assert!(Card::wild_draw_four(classic).playable_over(&red5));
        // (b) same color
        assert!(Card::skip(Color::Red).playable_over(&red5));
        // (c) same numeral
        assert!(Card::numeral(Color::Green, 5).playable_over(&red5));
        assert!(!Card::numeral(Color::Green, 6).playable_over(&red5));
        // (d) same special
        assert!(Card::skip(Color::Blue).playable_over(&Card::skip(Color::Red)));
        assert!(!Card::skip(Color::Blue).playable_over(&Card::reverse(Color::Red)));
        assert!(Card::draw_two(Color::Blue, classic)
            .playable_over(&Card::draw_two(Color::Red, classic)));
        // A skip is not a numeral 0
        assert!(!Card::skip(Color::Blue).playable_over(&Card::numeral(Color::Red, 0)));
    }

    #[test]
    fn test_nothing_plays_over_uncolored() {
        let wild = Card::wild();
        assert!(!Card::numeral(Color::Red, 5).playable_over(&wild));
        assert!(!Card::wild().playable_over(&wild));
    }

    #[test]
    fn test_colored_wild_accepts_its_color() {
        let mut wild = Card::wild();
        wild.color = Some(Color::Blue);
        assert!(Card::numeral(Color::Blue, 3).playable_over(&wild));
        assert!(!Card::numeral(Color::Red, 3).playable_over(&wild));
        assert!(Card::wild().playable_over(&wild));
    }

    #[test]
    fn test_combinable_with() {
        let r5 = Card::numeral(Color::Red, 5);
        assert!(r5.combinable_with(&Card::numeral(Color::Red, 5)));
        assert!(!r5.combinable_with(&Card::numeral(Color::Blue, 5)));
        assert!(!r5.combinable_with(&Card::numeral(Color::Red, 6)));
        assert!(!Card::skip(Color::Red).combinable_with(&Card::skip(Color::Red)));
        assert!(!Card::wild().combinable_with(&Card::wild()));
    }
}
