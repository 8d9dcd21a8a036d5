//! The session: one game at one table.
//!
//! `Session` owns every card and player of a game and is the only entry
//! point the chat layer talks to. Each operation names the acting player,
//! validates it against the turn state, mutates the table and answers with
//! a [`Response`].
//!
//! ## Rejections vs errors
//!
//! A player doing something illegal (playing out of turn, an unknown code,
//! a card that does not match) gets an `Ok(Response)` whose `play_state`
//! says why. `Err(EngineError)` is reserved for broken bookkeeping inside
//! the engine.
//!
//! ## Usage
//!
//! ```
//! use rust_uno::core::{Ruleset, SessionConfig};
//! use rust_uno::rules::{GameState, JoinOutcome, PlayState};
//! use rust_uno::session::Session;
//!
//! let mut session = Session::new(SessionConfig::new(Ruleset::Classic).with_seed(11));
//! assert_eq!(session.add_player("alice"), JoinOutcome::Joined);
//! assert_eq!(session.add_player("bob"), JoinOutcome::Joined);
//!
//! let response = session.start().unwrap();
//! assert_eq!(response.play_state, PlayState::JustStarted);
//! assert_ne!(session.state(), GameState::WaitingPlayers);
//! session.check_invariants().unwrap();
//! ```

use log::{debug, info, warn};

use super::cursor::TurnCursor;
use super::player::{sort_cards, Player};
use crate::cards::{Attribute, Attributes, Card, CardArena, Color, DECK_SIZE};
use crate::core::{
    CardHandle, EngineError, GameRng, Ruleset, SessionConfig, StartOptions, MIN_PLAYERS,
};
use crate::rules::{
    CardRef, GameInput, GameState, JoinOutcome, Outcome, PlayState, Response, ScoreEntry,
    SeatSummary, TableSummary, TurnMachine,
};
use crate::zones::{Deck, ZoneKind};

/// A game of Uno at one table.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    arena: CardArena,
    /// Every card, for telling unknown codes from cards held elsewhere.
    reference: Deck,
    draw_pile: Deck,
    discard_pile: Deck,
    /// Seats in turn order.
    players: Vec<Player>,
    /// Face-up card. Never part of the discard pile.
    current_card: Option<CardHandle>,
    pending_draw: u32,
    /// The opening card is being resolved; no play has happened yet.
    first_round: bool,
    machine: TurnMachine,
    cursor: TurnCursor,
    rng: GameRng,
}

impl Session {
    /// Create a table waiting for players.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let arena = CardArena::populate(config.ruleset);
        let reference = Deck::reference(&arena);
        let mut draw_pile = Deck::filled(ZoneKind::DrawPile, &arena);
        draw_pile.shuffle(&mut rng);

        debug!(
            "new {} table, seed {}",
            config.ruleset,
            rng.seed()
        );

        Self {
            config,
            arena,
            reference,
            draw_pile,
            discard_pile: Deck::new(ZoneKind::DiscardPile),
            players: Vec::new(),
            current_card: None,
            pending_draw: 0,
            first_round: false,
            machine: TurnMachine::new(),
            cursor: TurnCursor::new(),
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn ruleset(&self) -> Ruleset {
        self.config.ruleset
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    /// Seed of the table's RNG, for replaying a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Player names in turn order.
    #[must_use]
    pub fn seat_order(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name().to_string()).collect()
    }

    /// Whose turn it is. `None` outside a running game.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        if !self.state().is_in_progress() {
            return None;
        }
        self.players.get(self.cursor.current())
    }

    /// Who plays after the current player. `None` outside a running game.
    #[must_use]
    pub fn next_player(&self) -> Option<&Player> {
        if !self.state().is_in_progress() {
            return None;
        }
        self.players.get(self.cursor.next(self.players.len()))
    }

    /// The face-up card.
    #[must_use]
    pub fn current_card(&self) -> Option<CardRef> {
        self.current_card.and_then(|h| self.card_ref(h))
    }

    #[must_use]
    pub fn card(&self, handle: CardHandle) -> Option<&Card> {
        self.arena.get(handle)
    }

    #[must_use]
    pub fn arena(&self) -> &CardArena {
        &self.arena
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Deck {
        &self.discard_pile
    }

    /// Cards the next victim of a draw card will take.
    #[must_use]
    pub fn pending_draw(&self) -> u32 {
        self.pending_draw
    }

    fn card_ref(&self, handle: CardHandle) -> Option<CardRef> {
        self.arena.get(handle).map(|&card| CardRef { handle, card })
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }

    fn name_at(&self, index: usize) -> Option<String> {
        self.players.get(index).map(|p| p.name().to_string())
    }

    fn next_name(&self) -> Option<String> {
        self.name_at(self.cursor.next(self.players.len()))
    }

    fn table_card(&self) -> Result<(CardHandle, Card), EngineError> {
        let handle = self.current_card.ok_or(EngineError::NoCurrentCard)?;
        let card = self.arena.get(handle).ok_or(EngineError::NoCurrentCard)?;
        Ok((handle, *card))
    }

    fn respond(&self, play_state: PlayState) -> Response {
        let mut response = Response::new(play_state, self.state());
        let current = self.current_player().map(|p| p.name().to_string());
        response.player.clone_from(&current);
        response.next_player = current;
        response.current_card = self.current_card();
        response
    }

    // === Joining ===

    /// Seat a new player. Only possible before the game starts.
    pub fn add_player(&mut self, name: &str) -> JoinOutcome {
        if self.state() != GameState::WaitingPlayers {
            return JoinOutcome::NotJoinable;
        }
        if self.index_of(name).is_some() {
            return JoinOutcome::AlreadyJoined;
        }
        if self.players.len() >= self.config.max_players {
            return JoinOutcome::SessionFull;
        }
        debug!("{name} joins the table");
        self.players.push(Player::new(name));
        JoinOutcome::Joined
    }

    /// Follow a nick change. Fails if `new` is taken or `old` is unknown.
    pub fn rename_player(&mut self, old: &str, new: &str) -> bool {
        if self.index_of(new).is_some() {
            return false;
        }
        match self.index_of(old) {
            Some(index) => {
                debug!("{old} is now known as {new}");
                self.players[index].set_name(new);
                true
            }
            None => false,
        }
    }

    /// Record that a player announced their last card.
    pub fn declare_last_card(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.players[index].declare_last_card();
                true
            }
            None => false,
        }
    }

    // === Starting ===

    /// Start the game with default options.
    pub fn start(&mut self) -> Result<Response, EngineError> {
        self.start_with(StartOptions::default())
    }

    /// Start the game: seat players, deal hands, turn up the opening card
    /// and apply its effect.
    pub fn start_with(&mut self, options: StartOptions) -> Result<Response, EngineError> {
        if self.state() != GameState::WaitingPlayers {
            return Ok(self.respond(PlayState::AlreadyStarted));
        }
        if self.players.len() < self.config.min_players.max(MIN_PLAYERS) {
            return Ok(self.respond(PlayState::NotEnoughPlayers));
        }

        if options.shuffle_players.unwrap_or(self.config.shuffle_players) {
            self.rng.shuffle(&mut self.players);
        }
        for (name, codes) in &options.presets {
            self.deal_preset(name, codes)?;
        }
        self.deal()?;

        let opening = self.choose_opening(options.opening.as_deref())?;
        self.current_card = Some(opening);
        self.first_round = true;
        self.cursor.set(0);

        let mut outcome = self.apply_opening()?;
        outcome.ruleset = Some(self.config.ruleset);
        outcome.players = self.seat_order();

        info!(
            "game started: {} players, {} rules, opening {}, seed {}",
            self.players.len(),
            self.config.ruleset,
            self.arena.shorthand(opening),
            self.rng.seed()
        );

        let mut response = self.respond(PlayState::JustStarted);
        response.outcome = outcome;
        Ok(response)
    }

    fn deal_preset(&mut self, name: &str, codes: &[String]) -> Result<(), EngineError> {
        let Some(index) = self.index_of(name) else {
            warn!("ignoring preset hand for {name}: not at the table");
            return Ok(());
        };
        for code in codes {
            if self.players[index].card_count() >= self.config.hand_size {
                warn!("preset hand for {name} is larger than the hand size");
                break;
            }
            let (handle, _) = self.draw_pile.lookup(code, None);
            let Some(handle) = handle else {
                warn!("ignoring preset card {code} for {name}: not in the draw pile");
                continue;
            };
            self.draw_pile.remove(handle, &self.arena)?;
            self.players[index].receive(handle, &self.arena)?;
        }
        Ok(())
    }

    /// One card at a time, round robin, until every hand is full.
    fn deal(&mut self) -> Result<(), EngineError> {
        let hand_size = self.config.hand_size;
        for _ in 0..hand_size {
            for index in 0..self.players.len() {
                if self.players[index].card_count() >= hand_size {
                    continue;
                }
                let card = self
                    .draw_pile
                    .draw(&self.arena)
                    .ok_or(EngineError::EmptyDrawPile)?;
                self.players[index].receive(card, &self.arena)?;
            }
        }
        Ok(())
    }

    fn is_wild_draw(&self, handle: CardHandle) -> bool {
        self.arena
            .get(handle)
            .is_some_and(|c| c.is_wild() && c.has(Attribute::PickCards))
    }

    /// Take the opening card off the draw pile. A wild draw card never
    /// opens: it goes back into the pile away from the top and bottom.
    fn choose_opening(&mut self, forced: Option<&str>) -> Result<CardHandle, EngineError> {
        if let Some(code) = forced {
            match self.draw_pile.lookup(code, None) {
                (Some(handle), _) if !self.is_wild_draw(handle) => {
                    self.draw_pile.remove(handle, &self.arena)?;
                    return Ok(handle);
                }
                _ => warn!("opening card {code} is not available, turning up the top card"),
            }
        }

        for _ in 0..DECK_SIZE {
            let handle = self
                .draw_pile
                .draw(&self.arena)
                .ok_or(EngineError::EmptyDrawPile)?;
            if !self.is_wild_draw(handle) {
                return Ok(handle);
            }
            let position = self.rng.interior_position(self.draw_pile.len());
            debug!("wild draw card turned up, reinserted at {position}");
            self.draw_pile.insert_at(handle, position, &self.arena)?;
        }
        Err(EngineError::EmptyDrawPile)
    }

    /// The opening card acts as if a dealer seated before the first player
    /// had played it.
    fn apply_opening(&mut self) -> Result<Outcome, EngineError> {
        let (_, card) = self.table_card()?;
        let mut outcome = Outcome::default();

        match card.effect() {
            Attributes::Plain => {
                self.machine.apply(GameInput::Begin)?;
            }
            Attributes::Skip => {
                self.machine.apply(GameInput::Begin)?;
                outcome.affected = self.name_at(self.cursor.current());
                outcome.affected_attributes = Some(card.attributes);
                self.pass_turn(1);
            }
            Attributes::Reverse => {
                self.machine.apply(GameInput::Begin)?;
                self.reverse_seats();
            }
            Attributes::Wild => {
                self.machine.apply(GameInput::PlayedWild)?;
            }
            Attributes::Draw => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedDraw)?;
                outcome.affected = self.name_at(self.cursor.current());
                outcome.affected_attributes = Some(card.attributes);
                outcome.picked_count = self.pending_draw as usize;
            }
            Attributes::DrawSkip => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedDrawSkip)?;
                outcome = self.resolve_pending(self.cursor.current())?;
                self.pass_turn(1);
            }
            Attributes::WildDraw | Attributes::WildDrawSkip => {
                // Filtered out by `choose_opening`; the machine refuses it.
                self.machine.apply(GameInput::PlayedWildDraw)?;
            }
        }
        Ok(outcome)
    }

    // === Turn order ===

    /// Move the turn forward. The player who gets the turn starts it
    /// without having drawn.
    fn pass_turn(&mut self, steps: usize) {
        self.cursor.advance(steps, self.players.len());
        if let Some(player) = self.players.get_mut(self.cursor.current()) {
            player.set_has_drawn(false);
            debug!("turn passes to {}", player.name());
        }
    }

    fn reverse_seats(&mut self) {
        self.players.reverse();
        self.cursor.reversed(self.players.len());
    }

    // === Drawing ===

    /// Draw one card, flipping the discard pile into the draw pile when it
    /// runs out. Returns the card and whether a flip happened.
    fn draw_one(&mut self) -> (Option<CardHandle>, bool) {
        if let Some(handle) = self.draw_pile.draw(&self.arena) {
            return (Some(handle), false);
        }
        let flipped = self
            .draw_pile
            .flip_from(&mut self.discard_pile, &mut self.rng);
        if flipped {
            debug!("draw pile empty, discard pile shuffled back in");
        }
        (self.draw_pile.draw(&self.arena), flipped)
    }

    /// Give up to `count` cards to a player. Stops early if both piles are
    /// exhausted.
    fn draw_into(
        &mut self,
        index: usize,
        count: usize,
    ) -> Result<(Vec<CardHandle>, bool), EngineError> {
        let mut drawn = Vec::with_capacity(count);
        let mut flipped = false;
        for _ in 0..count {
            let (card, did_flip) = self.draw_one();
            flipped |= did_flip;
            let Some(card) = card else {
                warn!("no cards left to draw, {} short", count - drawn.len());
                break;
            };
            self.players[index].receive(card, &self.arena)?;
            drawn.push(card);
        }
        Ok((drawn, flipped))
    }

    /// Apply the pending draw to `victim` and reset it.
    fn resolve_pending(&mut self, victim: usize) -> Result<Outcome, EngineError> {
        let count = self.pending_draw as usize;
        self.pending_draw = 0;
        let (drawn, flipped) = self.draw_into(victim, count)?;
        let attributes = self.table_card().ok().map(|(_, card)| card.attributes);

        let affected = self.name_at(victim);
        debug!(
            "{} draws {} cards",
            affected.as_deref().unwrap_or("?"),
            drawn.len()
        );

        Ok(Outcome {
            affected,
            affected_attributes: attributes,
            picked_count: drawn.len(),
            picked_cards: sort_cards(&self.arena, drawn.into_iter()),
            deck_flipped: flipped,
            ..Outcome::default()
        })
    }

    // === Playing ===

    /// Check the common preconditions of `play`, `pick` and `skip`.
    /// Returns the actor's seat, or the rejection to send back.
    fn gate(&self, actor: &str) -> Result<usize, Response> {
        let reject = |state: PlayState| self.respond(state).with_player(actor);
        match self.state() {
            GameState::WaitingPlayers => return Err(reject(PlayState::NotStarted)),
            GameState::Ended => return Err(reject(PlayState::Ended)),
            _ => {}
        }
        let index = self
            .index_of(actor)
            .ok_or_else(|| reject(PlayState::NotJoined))?;
        if self.state().is_color_pending() {
            return Err(reject(PlayState::MustChooseColor));
        }
        if index != self.cursor.current() {
            return Err(reject(PlayState::NotYourTurn));
        }
        Ok(index)
    }

    /// Play one card, or two identical numerals with `code2`.
    pub fn play(
        &mut self,
        actor: &str,
        code: &str,
        code2: Option<&str>,
    ) -> Result<Response, EngineError> {
        let index = match self.gate(actor) {
            Ok(index) => index,
            Err(response) => return Ok(response),
        };
        let (current_handle, current) = self.table_card()?;

        if self.state() == GameState::WaitingAnswerToDraw {
            let check = self.players[index].check_play(&self.arena, &current, code, code2);
            let answers = check
                .card
                .and_then(|h| self.arena.get(h))
                .is_some_and(|c| c.has(Attribute::PickCards));
            if let Some(attempted) = check.card.filter(|_| check.is_valid() && !answers) {
                return self.refuse_unanswered_draw(index, attempted, current_handle);
            }
        }

        let check = self.players[index].play(&self.arena, &current, code, code2)?;
        if check.state == PlayState::CardNotInHand {
            return Ok(self.reject_missing(actor, code, code2));
        }
        let Some(CardRef { handle, card }) = check.card.and_then(|h| self.card_ref(h)) else {
            return Ok(self.reject_missing(actor, code, code2));
        };
        if !check.is_valid() {
            let mut response = self.respond(check.state).with_player(actor);
            response.card = self.card_ref(handle);
            response.additional_card = check.card2.and_then(|h| self.card_ref(h));
            return Ok(response);
        }

        self.first_round = false;
        self.discard_current()?;
        if let Some(card2) = check.card2 {
            self.discard_pile.add(card2, &self.arena)?;
        }
        self.current_card = Some(handle);
        debug!("{actor} plays {card}");

        let mut outcome = self.apply_effects()?;
        let mut play_state = check.state;

        if let Some(winner) = self.index_of(actor).filter(|&i| self.players[i].has_won()) {
            self.machine.apply(GameInput::GameEnded)?;
            let (scoreboard, win_points) = self.scoreboard(Some(winner));
            outcome.scoreboard = scoreboard;
            outcome.win_points = win_points;
            play_state = PlayState::Won;
            info!("{actor} wins, scoring {win_points} points");
        }

        let mut response = self.respond(play_state).with_player(actor);
        response.card = self.card_ref(handle);
        response.additional_card = check.card2.and_then(|h| self.card_ref(h));
        response.outcome = outcome;
        Ok(response)
    }

    /// Explain why a code could not be played from the actor's hand.
    fn reject_missing(&self, actor: &str, code: &str, code2: Option<&str>) -> Response {
        let unknown = std::iter::once(code)
            .chain(code2)
            .find(|c| !self.reference.has_code(c));

        match unknown {
            Some(code) => {
                let mut response = self.respond(PlayState::CardCodeUnknown).with_player(actor);
                response.outcome.unknown_code = Some(code.to_string());
                response
            }
            None => {
                let mut response = self.respond(PlayState::CardNotInHand).with_player(actor);
                let (first, second) = self.reference.lookup(code, code2);
                response.card = first.and_then(|h| self.card_ref(h));
                response.additional_card = second.and_then(|h| self.card_ref(h));
                response
            }
        }
    }

    /// A draw card is pending and the actor tried to play something that
    /// does not answer it: they take the pending cards and lose the turn.
    fn refuse_unanswered_draw(
        &mut self,
        index: usize,
        attempted: CardHandle,
        current: CardHandle,
    ) -> Result<Response, EngineError> {
        let actor = self.players[index].name().to_string();
        let outcome = self.resolve_pending(index)?;
        self.machine.apply(GameInput::DrawResolved)?;
        self.pass_turn(1);

        let mut response = self.respond(PlayState::InvalidPlay).with_player(actor);
        response.card = self.card_ref(attempted);
        response.additional_card = self.card_ref(current);
        response.outcome = outcome;
        Ok(response)
    }

    /// Move the face-up card to the discard pile, clearing a wild's color.
    fn discard_current(&mut self) -> Result<(), EngineError> {
        if let Some(old) = self.current_card.take() {
            self.arena.set_wild_color(old, None);
            self.discard_pile.add(old, &self.arena)?;
        }
        Ok(())
    }

    /// Effects of the card just played by the current player.
    fn apply_effects(&mut self) -> Result<Outcome, EngineError> {
        let (_, card) = self.table_card()?;
        let seats = self.players.len();
        let mut outcome = Outcome::default();

        match card.effect() {
            Attributes::Plain => self.pass_turn(1),
            Attributes::Skip => {
                outcome.affected = self.next_name();
                outcome.affected_attributes = Some(card.attributes);
                self.pass_turn(2);
            }
            Attributes::Reverse => {
                self.reverse_seats();
                outcome.players = self.seat_order();
                // With two players the reverser goes again
                self.pass_turn(if seats > 2 { 1 } else { 2 });
            }
            Attributes::Wild => {
                self.machine.apply(GameInput::PlayedWild)?;
            }
            Attributes::Draw => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedDraw)?;
                outcome.affected = self.next_name();
                outcome.affected_attributes = Some(card.attributes);
                outcome.picked_count = self.pending_draw as usize;
                self.pass_turn(1);
            }
            Attributes::DrawSkip => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedDrawSkip)?;
                let (_, victim) = self.cursor.pair(seats);
                outcome = self.resolve_pending(victim)?;
                self.pass_turn(2);
            }
            Attributes::WildDraw => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedWildDraw)?;
            }
            Attributes::WildDrawSkip => {
                self.pending_draw += u32::from(card.rank);
                self.machine.apply(GameInput::PlayedWildDrawSkip)?;
            }
        }
        Ok(outcome)
    }

    /// Choose the color of the wild card on the table.
    pub fn setcolor(&mut self, actor: &str, token: &str) -> Result<Response, EngineError> {
        let state = self.state();
        let reject = |session: &Self, play_state| session.respond(play_state).with_player(actor);

        match state {
            GameState::WaitingPlayers => return Ok(reject(self, PlayState::NotStarted)),
            GameState::Ended => return Ok(reject(self, PlayState::Ended)),
            _ => {}
        }
        let Some(index) = self.index_of(actor) else {
            return Ok(reject(self, PlayState::NotJoined));
        };
        if !state.is_color_pending() {
            return Ok(reject(self, PlayState::ColorAlreadyChosen));
        }
        if index != self.cursor.current() {
            return Ok(reject(self, PlayState::NotYourTurn));
        }
        let Ok(color) = token.parse::<Color>() else {
            let mut response = reject(self, PlayState::InvalidColor);
            response.outcome.invalid_color = Some(token.to_string());
            return Ok(response);
        };

        let (handle, _) = self.table_card()?;
        self.arena.set_wild_color(handle, Some(color));
        self.machine.apply(GameInput::ColorChosen)?;
        debug!("{actor} chooses {color}");

        let mut outcome = Outcome::default();
        if self.first_round {
            // Opening wild: the first player chose and now plays
            self.first_round = false;
        } else {
            match state {
                GameState::WaitingColorAfterWildDraw => {
                    outcome.affected = self.next_name();
                    outcome.affected_attributes = self.table_card().ok().map(|(_, c)| c.attributes);
                    outcome.picked_count = self.pending_draw as usize;
                    self.pass_turn(1);
                }
                GameState::WaitingColorAfterWildDrawSkip => {
                    let (_, victim) = self.cursor.pair(self.players.len());
                    outcome = self.resolve_pending(victim)?;
                    self.pass_turn(2);
                }
                _ => self.pass_turn(1),
            }
        }

        let mut response = self.respond(PlayState::ColorChosen).with_player(actor);
        response.card = self.card_ref(handle);
        response.outcome = outcome;
        Ok(response)
    }

    /// Draw a card, or take the pending draw when one is waiting.
    ///
    /// Either way the player keeps the turn and may then play or skip.
    pub fn pick(&mut self, actor: &str) -> Result<Response, EngineError> {
        let index = match self.gate(actor) {
            Ok(index) => index,
            Err(response) => return Ok(response),
        };

        if self.state() == GameState::WaitingAnswerToDraw {
            let outcome = self.resolve_pending(index)?;
            self.machine.apply(GameInput::DrawResolved)?;
            self.players[index].set_has_drawn(true);

            let mut response = self.respond(PlayState::PickedCard).with_player(actor);
            response.outcome = outcome;
            return Ok(response);
        }

        if self.players[index].has_drawn() {
            return Ok(self.respond(PlayState::AlreadyPicked).with_player(actor));
        }

        let (card, flipped) = self.draw_one();
        let Some(card) = card else {
            // Both piles are empty: the player may still pass
            warn!("{actor} cannot pick, no cards left");
            self.players[index].set_has_drawn(true);
            return Ok(self.respond(PlayState::CantPick).with_player(actor));
        };
        self.players[index].receive(card, &self.arena)?;
        self.players[index].set_has_drawn(true);
        debug!("{actor} picks a card");

        let mut response = self.respond(PlayState::PickedCard).with_player(actor);
        response.card = self.card_ref(card);
        response.outcome.picked_count = 1;
        response.outcome.picked_cards = response.card.into_iter().collect();
        response.outcome.deck_flipped = flipped;
        Ok(response)
    }

    /// Pass the turn. Only allowed after drawing, or to absorb a pending
    /// draw.
    pub fn skip(&mut self, actor: &str) -> Result<Response, EngineError> {
        let index = match self.gate(actor) {
            Ok(index) => index,
            Err(response) => return Ok(response),
        };

        if self.players[index].has_drawn() {
            self.pass_turn(1);
            return Ok(self.respond(PlayState::Skipped).with_player(actor));
        }

        if self.state() == GameState::WaitingAnswerToDraw {
            let outcome = self.resolve_pending(index)?;
            self.machine.apply(GameInput::DrawResolved)?;
            self.pass_turn(1);

            let mut response = self.respond(PlayState::SkippedAfterDraw).with_player(actor);
            response.outcome = outcome;
            return Ok(response);
        }

        Ok(self.respond(PlayState::MustPick).with_player(actor))
    }

    // === Leaving and ending ===

    /// Take a player out of the game at any point.
    ///
    /// Their cards go back into the draw pile at random positions that are
    /// neither the top nor the bottom. If they held the turn, the player
    /// after them inherits it, including a pending color choice or draw.
    pub fn remove_player(&mut self, name: &str) -> Result<Response, EngineError> {
        let state = self.state();
        if state == GameState::Ended {
            return Ok(self.respond(PlayState::Ended).with_player(name));
        }
        let Some(index) = self.index_of(name) else {
            return Ok(self.respond(PlayState::NotJoined).with_player(name));
        };

        for handle in self.players[index].take_hand() {
            let position = self.rng.interior_position(self.draw_pile.len());
            self.draw_pile.insert_at(handle, position, &self.arena)?;
        }
        self.players.remove(index);
        info!("{name} leaves the table");

        let mut outcome = Outcome {
            removed_player: Some(name.to_string()),
            ..Outcome::default()
        };

        if state == GameState::WaitingPlayers {
            outcome.players = self.seat_order();
            let mut response = self.respond(PlayState::PlayerRemoved).with_player(name);
            response.outcome = outcome;
            return Ok(response);
        }

        let held_turn = self.cursor.removed(index, self.players.len());
        if self.players.len() < MIN_PLAYERS {
            self.machine.apply(GameInput::GameEnded)?;
            let (scoreboard, win_points) = self.scoreboard(None);
            outcome.scoreboard = scoreboard;
            outcome.win_points = win_points;
            info!("game ended: not enough players");

            let mut response = self.respond(PlayState::NotEnoughPlayers).with_player(name);
            response.outcome = outcome;
            return Ok(response);
        }

        if held_turn {
            let current = self.cursor.current();
            self.players[current].set_has_drawn(false);
        }
        outcome.players = self.seat_order();

        let mut response = self.respond(PlayState::PlayerRemoved).with_player(name);
        response.outcome = outcome;
        Ok(response)
    }

    /// End the game now. A game that had started gets a scoreboard.
    pub fn stop(&mut self) -> Result<Response, EngineError> {
        let state = self.state();
        if state == GameState::Ended {
            return Ok(self.respond(PlayState::Ended));
        }

        let mut outcome = Outcome::default();
        if state.is_in_progress() {
            let (scoreboard, win_points) = self.scoreboard(None);
            outcome.scoreboard = scoreboard;
            outcome.win_points = win_points;
        }
        self.machine.apply(GameInput::GameEnded)?;
        info!("game stopped");

        let mut response = self.respond(PlayState::Ended);
        response.outcome = outcome;
        Ok(response)
    }

    /// Points left in every hand except the winner's, ascending and
    /// truncated, plus the sum of all of them.
    fn scoreboard(&self, winner: Option<usize>) -> (Vec<ScoreEntry>, u32) {
        let mut entries: Vec<ScoreEntry> = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != winner)
            .map(|(_, p)| ScoreEntry {
                player: p.name().to_string(),
                points: p.hand_points(&self.arena),
            })
            .collect();
        let win_points = entries.iter().map(|e| e.points).sum();
        entries.sort_by_key(|e| e.points);
        entries.truncate(self.config.scoreboard_size);
        (entries, win_points)
    }

    // === Information and operator commands ===

    /// A player's hand, sorted, for sending privately.
    #[must_use]
    pub fn advise_cards(&self, name: &str) -> Response {
        let Some(player) = self.player(name) else {
            return self.respond(PlayState::NotJoined).with_player(name);
        };
        let mut response = self.respond(PlayState::AdviseCards).with_player(name);
        response.outcome.hand = player.sorted_hand(&self.arena);
        response
    }

    /// Cards in a player's hand that could go on the table right now.
    ///
    /// Empty when it is not the player's turn to play a card.
    #[must_use]
    pub fn playable_cards(&self, name: &str) -> Vec<CardRef> {
        let Ok(index) = self.gate(name) else {
            return Vec::new();
        };
        let Ok((_, current)) = self.table_card() else {
            return Vec::new();
        };
        let answering = self.state() == GameState::WaitingAnswerToDraw;
        self.players[index]
            .sorted_hand(&self.arena)
            .into_iter()
            .filter(|r| r.card.playable_over(&current))
            .filter(|r| !answering || r.card.has(Attribute::PickCards))
            .collect()
    }

    /// Snapshot of the table.
    #[must_use]
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            state: self.state(),
            ruleset: self.config.ruleset,
            current_player: self.current_player().map(|p| p.name().to_string()),
            current_card: self.current_card(),
            seats: self
                .players
                .iter()
                .map(|p| SeatSummary {
                    name: p.name().to_string(),
                    cards: p.card_count(),
                    declared_last_card: p.declared_last_card(),
                    last_card: p.at_last_card(),
                })
                .collect(),
            draw_pile: self.draw_pile.len(),
            discard_pile: self.discard_pile.len(),
            pending_draw: self.pending_draw,
            seed: self.rng.seed(),
        }
    }

    /// Operator command: move cards from the draw pile into a hand.
    ///
    /// With a code, gives up to `count` cards carrying it; without, gives
    /// the top `count` cards.
    pub fn give(
        &mut self,
        name: &str,
        code: Option<&str>,
        count: usize,
    ) -> Result<Response, EngineError> {
        match self.state() {
            GameState::WaitingPlayers => {
                return Ok(self.respond(PlayState::NotStarted).with_player(name))
            }
            GameState::Ended => return Ok(self.respond(PlayState::Ended).with_player(name)),
            _ => {}
        }
        let Some(index) = self.index_of(name) else {
            return Ok(self.respond(PlayState::NotJoined).with_player(name));
        };
        if let Some(code) = code.filter(|c| !self.reference.has_code(c)) {
            let mut response = self.respond(PlayState::CardCodeUnknown).with_player(name);
            response.outcome.unknown_code = Some(code.to_string());
            return Ok(response);
        }

        let mut given = Vec::new();
        let mut flipped = false;
        for _ in 0..count.max(1) {
            let card = match code {
                Some(code) => {
                    let (handle, _) = self.draw_pile.lookup(code, None);
                    if let Some(handle) = handle {
                        self.draw_pile.remove(handle, &self.arena)?;
                    }
                    handle
                }
                None => {
                    let (handle, did_flip) = self.draw_one();
                    flipped |= did_flip;
                    handle
                }
            };
            let Some(card) = card else {
                break;
            };
            self.players[index].receive(card, &self.arena)?;
            given.push(card);
        }
        info!("{name} was given {} cards", given.len());

        let play_state = if given.is_empty() {
            PlayState::CantPick
        } else {
            PlayState::PickedCard
        };
        let mut response = self.respond(play_state).with_player(name);
        response.outcome.affected = Some(name.to_string());
        response.outcome.picked_count = given.len();
        response.outcome.picked_cards = sort_cards(&self.arena, given.into_iter());
        response.outcome.deck_flipped = flipped;
        Ok(response)
    }

    // === Invariants ===

    /// Verify the table's bookkeeping.
    ///
    /// Checks that every card is in exactly one place, that the face-up
    /// card has a color unless one is being chosen, and that the turn
    /// cursor points at a seat.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let mut seen = vec![false; self.arena.len()];
        let mut found = 0;

        let locations = self
            .draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand().iter()))
            .chain(self.current_card);
        for handle in locations {
            found += 1;
            match seen.get_mut(handle.index()) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(EngineError::CardInTwoZones(handle)),
            }
        }
        if found != DECK_SIZE {
            return Err(EngineError::ConservationViolated {
                found,
                expected: DECK_SIZE,
            });
        }

        let state = self.state();
        if state.is_in_progress() {
            let (_, card) = self.table_card()?;
            if card.color.is_none() && !state.is_color_pending() {
                return Err(EngineError::UncoloredCurrentCard);
            }
            self.cursor.validate(self.players.len())?;
        }
        Ok(())
    }
}
