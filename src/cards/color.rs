//! Card colors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ParseError;

/// One of the four suit colors.
///
/// An uncolored card (a wild that has not been played yet) is represented
/// as `Option<Color>::None` on the card, not as a variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

/// mIRC color code used for uncolored cards.
pub const NO_COLOR_IRC_CODE: u8 = 0;

impl Color {
    /// All colors, in deck-building order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Shorthand letter (`r`, `y`, `g`, `b`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
        }
    }

    /// Capitalized name used in card names.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
        }
    }

    /// mIRC background color code.
    #[must_use]
    pub const fn irc_code(self) -> u8 {
        match self {
            Color::Red => 4,
            Color::Yellow => 8,
            Color::Green => 9,
            Color::Blue => 12,
        }
    }

    /// Parse a shorthand letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Color> {
        match letter.to_ascii_lowercase() {
            'r' => Some(Color::Red),
            'y' => Some(Color::Yellow),
            'g' => Some(Color::Green),
            'b' => Some(Color::Blue),
            _ => None,
        }
    }
}

/// Accepts a single letter or a full color name, in any case.
impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Color::from_letter(c).ok_or_else(|| ParseError::UnknownColor(s.to_string()));
        }
        Color::ALL
            .into_iter()
            .find(|color| color.display_name().eq_ignore_ascii_case(&token))
            .ok_or_else(|| ParseError::UnknownColor(s.to_string()))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
