//! Players and their hands.

use serde::Serialize;

use crate::cards::{Card, CardArena};
use crate::core::{CardHandle, EngineError};
use crate::rules::{CardRef, PlayState};
use crate::zones::{Deck, ZoneKind};

/// Result of validating a play against a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayCheck {
    pub card: Option<CardHandle>,
    pub card2: Option<CardHandle>,
    pub state: PlayState,
}

impl PlayCheck {
    fn rejected(state: PlayState, card: Option<CardHandle>, card2: Option<CardHandle>) -> Self {
        Self { card, card2, state }
    }

    /// Did validation succeed?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.state, PlayState::ValidPlay | PlayState::ValidDoublePlay)
    }
}

/// A participant at the table.
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    hand: Deck,
    has_drawn: bool,
    declared_last_card: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Deck::new(ZoneKind::Hand),
            has_drawn: false,
            declared_last_card: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn hand(&self) -> &Deck {
        &self.hand
    }

    /// Has the player drawn a card during the current turn?
    #[must_use]
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub(crate) fn set_has_drawn(&mut self, drawn: bool) {
        self.has_drawn = drawn;
    }

    /// Did the player announce their last card?
    #[must_use]
    pub fn declared_last_card(&self) -> bool {
        self.declared_last_card
    }

    pub(crate) fn declare_last_card(&mut self) {
        self.declared_last_card = true;
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn at_last_card(&self) -> bool {
        self.hand.len() == 1
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.hand.is_empty()
    }

    /// Add a card to the hand. Clears a last-card declaration.
    pub fn receive(&mut self, handle: CardHandle, arena: &CardArena) -> Result<(), EngineError> {
        self.declared_last_card = false;
        self.hand.add(handle, arena)
    }

    /// Empty the hand, returning its cards.
    pub(crate) fn take_hand(&mut self) -> Vec<CardHandle> {
        self.hand.take_all()
    }

    /// Points left in the hand.
    #[must_use]
    pub fn hand_points(&self, arena: &CardArena) -> u32 {
        self.hand.iter().map(|h| arena.points(h)).sum()
    }

    /// The hand sorted by color (wild cards first) then points.
    #[must_use]
    pub fn sorted_hand(&self, arena: &CardArena) -> Vec<CardRef> {
        sort_cards(arena, self.hand.iter())
    }

    /// Validate playing `code` (and `code2` for a double play) on top of
    /// `current`. Does not change the hand.
    #[must_use]
    pub fn check_play(
        &self,
        arena: &CardArena,
        current: &Card,
        code: &str,
        code2: Option<&str>,
    ) -> PlayCheck {
        let (first, second) = self.hand.lookup(code, code2);

        let Some((handle, card)) = first.and_then(|h| arena.get(h).map(|c| (h, c))) else {
            return PlayCheck::rejected(PlayState::CardNotInHand, None, None);
        };
        if code2.is_some() && second.is_none() {
            return PlayCheck::rejected(PlayState::CardNotInHand, Some(handle), None);
        }

        if !card.playable_over(current) {
            return PlayCheck::rejected(PlayState::InvalidPlay, Some(handle), None);
        }

        match second.and_then(|h| arena.get(h).map(|c| (h, c))) {
            Some((handle2, card2)) if card.combinable_with(card2) => PlayCheck {
                card: Some(handle),
                card2: Some(handle2),
                state: PlayState::ValidDoublePlay,
            },
            Some((handle2, _)) => {
                PlayCheck::rejected(PlayState::InvalidDoublePlay, Some(handle), Some(handle2))
            }
            None => PlayCheck {
                card: Some(handle),
                card2: None,
                state: PlayState::ValidPlay,
            },
        }
    }

    /// Validate a play and, if valid, remove the cards from the hand.
    pub fn play(
        &mut self,
        arena: &CardArena,
        current: &Card,
        code: &str,
        code2: Option<&str>,
    ) -> Result<PlayCheck, EngineError> {
        let check = self.check_play(arena, current, code, code2);
        if check.is_valid() {
            self.remove_played(&check, arena)?;
        }
        Ok(check)
    }

    /// Remove the cards of a validated play from the hand.
    fn remove_played(
        &mut self,
        check: &PlayCheck,
        arena: &CardArena,
    ) -> Result<(), EngineError> {
        for handle in [check.card, check.card2].into_iter().flatten() {
            self.hand.remove(handle, arena)?;
        }
        Ok(())
    }
}

/// Sort cards by color (uncolored first) then points.
pub(crate) fn sort_cards(
    arena: &CardArena,
    handles: impl Iterator<Item = CardHandle>,
) -> Vec<CardRef> {
    let mut cards: Vec<CardRef> = handles
        .filter_map(|handle| arena.get(handle).map(|&card| CardRef { handle, card }))
        .collect();
    cards.sort_by_key(|r| (r.card.color, r.card.points, r.handle));
    cards
}
