//! Results returned by session operations.
//!
//! Every operation answers with a [`Response`]: who acted, who is next, the
//! card on the table, what was played, and a typed [`Outcome`] describing
//! side effects. The chat layer renders these into localized text; the
//! engine never formats messages itself.
//!
//! All types serialize with serde so responses can be logged or shipped to
//! another process as JSON.

use serde::{Deserialize, Serialize};

use super::machine::GameState;
use crate::cards::{Attributes, Card};
use crate::core::{CardHandle, Ruleset};

/// What happened to the requested operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    // === Gates ===
    NotJoined,
    NotYourTurn,
    NotStarted,
    AlreadyStarted,

    // === Start ===
    JustStarted,

    // === Playing cards ===
    ValidPlay,
    ValidDoublePlay,
    InvalidPlay,
    InvalidDoublePlay,
    /// The card exists but the player does not hold it.
    CardNotInHand,
    /// No card has this code.
    CardCodeUnknown,

    // === Drawing and passing ===
    MustPick,
    PickedCard,
    AlreadyPicked,
    CantPick,
    Skipped,
    /// The player passed and absorbed a pending draw.
    SkippedAfterDraw,

    // === Color choice ===
    MustChooseColor,
    InvalidColor,
    ColorChosen,
    ColorAlreadyChosen,

    // === Information ===
    AdviseCards,

    // === End of game ===
    Won,
    Ended,
    NotEnoughPlayers,
    PlayerRemoved,
}

impl PlayState {
    /// Did the operation change the table?
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            PlayState::JustStarted
                | PlayState::ValidPlay
                | PlayState::ValidDoublePlay
                | PlayState::PickedCard
                | PlayState::Skipped
                | PlayState::SkippedAfterDraw
                | PlayState::ColorChosen
                | PlayState::Won
                | PlayState::Ended
                | PlayState::NotEnoughPlayers
                | PlayState::PlayerRemoved
        )
    }
}

/// Result of `Session::add_player`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    SessionFull,
    /// The game already started or ended.
    NotJoinable,
}

/// A card on the table, with its handle for identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub handle: CardHandle,
    pub card: Card,
}

/// One line of the final scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    /// Points left in the player's hand.
    pub points: u32,
}

/// Side effects of an operation. Fields are empty when not applicable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Player hit by a skip or draw effect.
    pub affected: Option<String>,
    /// Effects of the card that hit `affected`.
    pub affected_attributes: Option<Attributes>,
    /// Number of cards drawn, by the acting or the affected player.
    pub picked_count: usize,
    /// Cards drawn, sorted by color then points.
    pub picked_cards: Vec<CardRef>,
    /// The discard pile was shuffled back into the draw pile.
    pub deck_flipped: bool,
    /// Seat order after a reverse, a start or a removal.
    pub players: Vec<String>,
    pub removed_player: Option<String>,
    /// Remaining points per player, ascending.
    pub scoreboard: Vec<ScoreEntry>,
    /// Sum of every other player's remaining points.
    pub win_points: u32,
    pub ruleset: Option<Ruleset>,
    /// A player's hand, sorted by color then points.
    pub hand: Vec<CardRef>,
    /// Code that matched no card.
    pub unknown_code: Option<String>,
    /// Color token that was not understood.
    pub invalid_color: Option<String>,
}

/// Answer to every session operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// The acting player, if any.
    pub player: Option<String>,
    /// Whose turn it is after the operation.
    pub next_player: Option<String>,
    pub current_card: Option<CardRef>,
    /// Card played (or attempted).
    pub card: Option<CardRef>,
    /// Second card of a double play, or the card on the table when a play
    /// was refused.
    pub additional_card: Option<CardRef>,
    pub outcome: Outcome,
    pub game_state: GameState,
    pub play_state: PlayState,
}

impl Response {
    /// A response with nothing but the states filled in.
    #[must_use]
    pub fn new(play_state: PlayState, game_state: GameState) -> Self {
        Self {
            player: None,
            next_player: None,
            current_card: None,
            card: None,
            additional_card: None,
            outcome: Outcome::default(),
            game_state,
            play_state,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }
}

/// A player's seat as shown by `Session::summary`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub name: String,
    pub cards: usize,
    pub declared_last_card: bool,
    /// Down to a single card.
    pub last_card: bool,
}

/// Snapshot of a table for information commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub state: GameState,
    pub ruleset: Ruleset,
    pub current_player: Option<String>,
    pub current_card: Option<CardRef>,
    /// Seats in turn order.
    pub seats: Vec<SeatSummary>,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub pending_draw: u32,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    #[test]
    fn test_response_builder() {
        let response =
            Response::new(PlayState::NotYourTurn, GameState::Playing).with_player("alice");
        assert_eq!(response.player.as_deref(), Some("alice"));
        assert_eq!(response.outcome, Outcome::default());
        assert!(!response.play_state.is_success());
    }

    #[test]
    fn test_response_serializes() {
        let mut response = Response::new(PlayState::ValidPlay, GameState::Playing);
        response.card = Some(CardRef {
            handle: CardHandle(3),
            card: Card::numeral(Color::Red, 3),
        });
        response.outcome.ruleset = Some(Ruleset::NoSkip);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["play_state"], "ValidPlay");
        assert_eq!(json["card"]["card"]["color"], "red");
        assert_eq!(json["outcome"]["ruleset"], "noskip");

        let back: Response = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_success_states() {
        assert!(PlayState::ValidDoublePlay.is_success());
        assert!(PlayState::PlayerRemoved.is_success());
        assert!(!PlayState::InvalidPlay.is_success());
        assert!(!PlayState::MustChooseColor.is_success());
    }
}
