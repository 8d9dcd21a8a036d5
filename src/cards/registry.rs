//! The card arena.
//!
//! The `CardArena` owns the 108 physical cards of a session. Zones hold
//! [`CardHandle`]s into it. Card faces are fixed once populated, except for
//! the color of wild cards, which is set when played and cleared when the
//! card leaves the table.

use super::card::Card;
use super::color::Color;
use crate::core::{CardHandle, Ruleset};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 108;

/// Storage for every physical card of a session.
///
/// ## Example
///
/// ```
/// use rust_uno::cards::{CardArena, DECK_SIZE};
/// use rust_uno::core::Ruleset;
///
/// let arena = CardArena::populate(Ruleset::Classic);
/// assert_eq!(arena.len(), DECK_SIZE);
///
/// let wilds = arena.iter().filter(|(_, card)| card.is_wild()).count();
/// assert_eq!(wilds, 8);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardArena {
    cards: Vec<Card>,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard deck for a ruleset.
    ///
    /// Per color: one 0, two each of 1-9, two each of skip, reverse and
    /// draw-two. Then four each of wild draw-four and wild.
    #[must_use]
    pub fn populate(ruleset: Ruleset) -> Self {
        let mut arena = Self {
            cards: Vec::with_capacity(DECK_SIZE),
        };

        for color in Color::ALL {
            arena.register(Card::numeral(color, 0));
            for _ in 0..2 {
                for rank in 1..=9 {
                    arena.register(Card::numeral(color, rank));
                }
            }
            for _ in 0..2 {
                arena.register(Card::skip(color));
                arena.register(Card::reverse(color));
                arena.register(Card::draw_two(color, ruleset));
            }
        }
        for _ in 0..4 {
            arena.register(Card::wild_draw_four(ruleset));
            arena.register(Card::wild());
        }

        arena
    }

    /// Add a card and return its handle.
    pub fn register(&mut self, card: Card) -> CardHandle {
        let handle = CardHandle::new(self.cards.len() as u16);
        self.cards.push(card);
        handle
    }

    /// Get a card by handle.
    #[must_use]
    pub fn get(&self, handle: CardHandle) -> Option<&Card> {
        self.cards.get(handle.index())
    }

    /// Get a mutable card by handle.
    pub fn get_mut(&mut self, handle: CardHandle) -> Option<&mut Card> {
        self.cards.get_mut(handle.index())
    }

    /// Set the chosen color of a wild card. No-op for other cards.
    pub fn set_wild_color(&mut self, handle: CardHandle, color: Option<Color>) {
        if let Some(card) = self.get_mut(handle) {
            if card.is_wild() {
                card.color = color;
            }
        }
    }

    /// Shorthand of a card, or an empty string for an unknown handle.
    #[must_use]
    pub fn shorthand(&self, handle: CardHandle) -> String {
        self.get(handle).map(Card::shorthand).unwrap_or_default()
    }

    /// Points of a card (0 for an unknown handle).
    #[must_use]
    pub fn points(&self, handle: CardHandle) -> u32 {
        self.get(handle).map_or(0, |card| card.points)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (CardHandle, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardHandle::new(i as u16), card))
    }

    /// All handles, in arena order.
    pub fn handles(&self) -> impl Iterator<Item = CardHandle> + '_ {
        (0..self.cards.len()).map(|i| CardHandle::new(i as u16))
    }
}
