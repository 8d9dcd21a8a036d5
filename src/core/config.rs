//! Session configuration types.
//!
//! Tables are configured when they are created:
//! - `Ruleset`: Which variant of the draw-card rules is in force
//! - `SessionConfig`: Table limits, hand size, scoreboard length, seed
//! - `StartOptions`: Per-start overrides (forced opening card, seat order,
//!   preset hands), mostly useful for tests and operator tooling
//!
//! The chat layer usually builds a `SessionConfig` from the mode word the
//! user typed (`"classic"`, `"noskip"`):
//!
//! ```
//! use rust_uno::core::{Ruleset, SessionConfig};
//!
//! let ruleset: Ruleset = "noskip".parse().unwrap();
//! let config = SessionConfig::new(ruleset).with_seed(7).with_max_players(6);
//!
//! assert_eq!(config.ruleset, Ruleset::NoSkip);
//! assert_eq!(config.max_players, 6);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// Cards dealt to each player at start.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Fewest players a table can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a table accepts.
pub const MAX_PLAYERS: usize = 10;

/// Entries kept on the final scoreboard.
pub const DEFAULT_SCOREBOARD_SIZE: usize = 5;

/// Draw-card rule variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Draw cards also skip the victim, who draws immediately.
    #[default]
    Classic,
    /// Draw cards do not skip; the victim may answer with another draw card.
    NoSkip,
}

impl Ruleset {
    /// Does a draw card also skip its victim under this ruleset?
    #[must_use]
    pub const fn draw_cards_skip(self) -> bool {
        matches!(self, Ruleset::Classic)
    }

    /// Lowercase name, as typed by users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Ruleset::Classic => "classic",
            Ruleset::NoSkip => "noskip",
        }
    }
}

impl FromStr for Ruleset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "classic" => Ok(Ruleset::Classic),
            "noskip" => Ok(Ruleset::NoSkip),
            _ => Err(ParseError::UnknownRuleset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Draw-card rule variant.
    pub ruleset: Ruleset,

    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Players needed before `start` succeeds.
    pub min_players: usize,

    /// Players accepted before the table is full.
    pub max_players: usize,

    /// Entries reported on the final scoreboard.
    pub scoreboard_size: usize,

    /// RNG seed. `None` draws a seed from the operating system.
    pub seed: Option<u64>,

    /// Shuffle the seat order when the game starts.
    pub shuffle_players: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Ruleset::default())
    }
}

impl SessionConfig {
    /// Create a configuration with standard table limits.
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            hand_size: DEFAULT_HAND_SIZE,
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            scoreboard_size: DEFAULT_SCOREBOARD_SIZE,
            seed: None,
            shuffle_players: true,
        }
    }

    /// Fix the RNG seed (reproducible games).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of cards dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the maximum number of players, capped at [`MAX_PLAYERS`].
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    /// Set the scoreboard length.
    #[must_use]
    pub fn with_scoreboard_size(mut self, size: usize) -> Self {
        self.scoreboard_size = size;
        self
    }

    /// Keep players in join order instead of shuffling seats.
    #[must_use]
    pub fn keep_seat_order(mut self) -> Self {
        self.shuffle_players = false;
        self
    }
}

/// Overrides for a single call to `Session::start_with`.
///
/// ```
/// use rust_uno::core::StartOptions;
///
/// let options = StartOptions::new()
///     .opening("r5")
///     .preset("alice", &["rs", "j+4"])
///     .keep_seat_order();
///
/// assert_eq!(options.opening.as_deref(), Some("r5"));
/// assert_eq!(options.presets.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOptions {
    /// Card code to force as the opening card.
    ///
    /// Ignored (with a warning) if the card is unknown or is a wild draw
    /// card, which may never open a game.
    pub opening: Option<String>,

    /// Overrides `SessionConfig::shuffle_players` when set.
    pub shuffle_players: Option<bool>,

    /// Cards dealt to a player before the random deal tops them up.
    pub presets: Vec<(String, Vec<String>)>,
}

impl StartOptions {
    /// Create empty options (behaves like a plain `start`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the opening card.
    #[must_use]
    pub fn opening(mut self, code: impl Into<String>) -> Self {
        self.opening = Some(code.into());
        self
    }

    /// Keep players in join order for this start.
    #[must_use]
    pub fn keep_seat_order(mut self) -> Self {
        self.shuffle_players = Some(false);
        self
    }

    /// Deal these cards to `player` first.
    #[must_use]
    pub fn preset(mut self, player: impl Into<String>, codes: &[&str]) -> Self {
        self.presets.push((
            player.into(),
            codes.iter().map(|c| (*c).to_string()).collect(),
        ));
        self
    }
}
