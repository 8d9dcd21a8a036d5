//! Ordered card zones.
//!
//! A `Deck` is any place cards can be: the draw pile, the discard pile, a
//! player's hand, or the reference set used for code lookups. It tracks:
//! - An ordered list of handles (index 0 = bottom, last = top)
//! - An index from canonical shorthand to the handles carrying it
//!
//! Moving a card between decks is always `remove` followed by `add`, so a
//! handle is never in two decks at once.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{canonical_code, CardArena};
use crate::core::{CardHandle, EngineError, GameRng};

/// What a deck is used for. Only affects error messages and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    DrawPile,
    DiscardPile,
    Hand,
    /// Every card of the session, used to tell unknown codes from cards
    /// that are merely elsewhere.
    Reference,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ZoneKind::DrawPile => "draw pile",
            ZoneKind::DiscardPile => "discard pile",
            ZoneKind::Hand => "hand",
            ZoneKind::Reference => "reference set",
        })
    }
}

type CodeIndex = FxHashMap<String, SmallVec<[CardHandle; 2]>>;

/// An ordered collection of cards with shorthand lookup.
///
/// ## Usage
///
/// ```
/// use rust_uno::cards::CardArena;
/// use rust_uno::core::Ruleset;
/// use rust_uno::zones::{Deck, ZoneKind};
///
/// let arena = CardArena::populate(Ruleset::Classic);
/// let mut pile = Deck::reference(&arena);
/// let mut hand = Deck::new(ZoneKind::Hand);
///
/// // Two identical codes resolve to two different physical cards
/// let (first, second) = pile.lookup("r5", Some("r5"));
/// assert_ne!(first, second);
///
/// let card = first.unwrap();
/// pile.remove(card, &arena).unwrap();
/// hand.add(card, &arena).unwrap();
/// assert!(hand.has_code("r5"));
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    kind: ZoneKind,
    cards: Vec<CardHandle>,
    index: CodeIndex,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(kind: ZoneKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
            index: CodeIndex::default(),
        }
    }

    /// A deck holding every card of `arena`, in arena order.
    #[must_use]
    pub fn reference(arena: &CardArena) -> Self {
        Self::filled(ZoneKind::Reference, arena)
    }

    /// A deck of `kind` holding every card of `arena`, in arena order.
    #[must_use]
    pub fn filled(kind: ZoneKind, arena: &CardArena) -> Self {
        let mut deck = Self::new(kind);
        for (handle, card) in arena.iter() {
            deck.cards.push(handle);
            deck.index.entry(card.shorthand()).or_default().push(handle);
        }
        deck
    }

    #[must_use]
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Handles from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = CardHandle> + '_ {
        self.cards.iter().copied()
    }

    /// Handles from bottom to top, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CardHandle] {
        &self.cards
    }

    /// The top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<CardHandle> {
        self.cards.last().copied()
    }

    /// Check if a specific physical card is in this deck.
    #[must_use]
    pub fn contains(&self, handle: CardHandle) -> bool {
        self.cards.contains(&handle)
    }

    /// Check if any card with this code is in this deck.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        canonical_code(code)
            .and_then(|code| self.index.get(&code))
            .is_some_and(|handles| !handles.is_empty())
    }

    /// All cards in this deck carrying a code.
    #[must_use]
    pub fn with_code(&self, code: &str) -> &[CardHandle] {
        match canonical_code(code).and_then(|code| self.index.get(&code)) {
            Some(handles) => handles.as_slice(),
            None => &[],
        }
    }

    /// Put a card on top.
    pub fn add(&mut self, handle: CardHandle, arena: &CardArena) -> Result<(), EngineError> {
        let len = self.cards.len();
        self.insert_at(handle, len, arena)
    }

    /// Put a card at `position` (clamped to the deck size).
    pub fn insert_at(
        &mut self,
        handle: CardHandle,
        position: usize,
        arena: &CardArena,
    ) -> Result<(), EngineError> {
        if self.contains(handle) {
            return Err(EngineError::DuplicateCard {
                card: handle,
                zone: self.kind,
            });
        }
        let position = position.min(self.cards.len());
        self.cards.insert(position, handle);
        self.index.entry(arena.shorthand(handle)).or_default().push(handle);
        Ok(())
    }

    /// Take a specific card out of this deck.
    pub fn remove(&mut self, handle: CardHandle, arena: &CardArena) -> Result<(), EngineError> {
        let position = self
            .cards
            .iter()
            .position(|&h| h == handle)
            .ok_or(EngineError::CardNotInZone {
                card: handle,
                zone: self.kind,
            })?;
        self.cards.remove(position);
        self.unindex(handle, arena);
        Ok(())
    }

    /// Take the top card, or `None` if the deck is empty.
    pub fn draw(&mut self, arena: &CardArena) -> Option<CardHandle> {
        let handle = self.cards.pop()?;
        self.unindex(handle, arena);
        Some(handle)
    }

    /// Remove and return every card, bottom to top.
    pub fn take_all(&mut self) -> Vec<CardHandle> {
        self.index.clear();
        std::mem::take(&mut self.cards)
    }

    fn unindex(&mut self, handle: CardHandle, arena: &CardArena) {
        let code = arena.shorthand(handle);
        if let Some(handles) = self.index.get_mut(&code) {
            handles.retain(|h| *h != handle);
            if handles.is_empty() {
                self.index.remove(&code);
            }
        }
    }

    /// Shuffle card order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Refill this deck from `other` when this deck is empty.
    ///
    /// Takes every card of `other`, shuffles, and leaves `other` empty.
    /// Returns `true` if any card moved.
    pub fn flip_from(&mut self, other: &mut Deck, rng: &mut GameRng) -> bool {
        if !self.is_empty() || other.is_empty() {
            return false;
        }
        self.cards = std::mem::take(&mut other.cards);
        self.index = std::mem::take(&mut other.index);
        self.shuffle(rng);
        true
    }

    /// Resolve one or two codes to cards in this deck.
    ///
    /// When both codes are equal, the second resolves to a different
    /// physical card than the first (or `None` if there is only one).
    #[must_use]
    pub fn lookup(&self, code: &str, code2: Option<&str>) -> (Option<CardHandle>, Option<CardHandle>) {
        let first_code = canonical_code(code);
        let first = first_code
            .as_ref()
            .and_then(|c| self.index.get(c))
            .and_then(|handles| handles.first().copied());

        let second = code2.and_then(|code2| {
            let second_code = canonical_code(code2)?;
            let handles = self.index.get(&second_code)?;
            if first_code.as_deref() == Some(second_code.as_str()) {
                handles.get(1).copied()
            } else {
                handles.first().copied()
            }
        });

        (first, second)
    }
}
