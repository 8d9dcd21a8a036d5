//! Property-based tests.
//!
//! Random players take random legal actions; whatever they do, every
//! card stays in exactly one place and the table stays consistent.

use proptest::prelude::*;
use rust_uno::cards::{canonical_code, Attributes, CardArena, Color, DECK_SIZE};
use rust_uno::core::{EngineError, GameRng, Ruleset, SessionConfig};
use rust_uno::rules::{GameState, PlayState};
use rust_uno::session::{Player, Session, SessionBuilder};
use rust_uno::zones::Deck;

// =============================================================================
// Strategies and helpers
// =============================================================================

fn arb_ruleset() -> impl Strategy<Value = Ruleset> {
    prop_oneof![Just(Ruleset::Classic), Just(Ruleset::NoSkip)]
}

fn started(seed: u64, seats: usize, ruleset: Ruleset) -> Session {
    let mut session = Session::new(SessionConfig::new(ruleset).with_seed(seed));
    for i in 0..seats {
        session.add_player(&format!("p{i}"));
    }
    session.start().unwrap();
    session
}

/// One legal action for whoever holds the turn.
fn act(session: &mut Session, rng: &mut GameRng) -> Result<PlayState, EngineError> {
    let Some(name) = session.current_player().map(|p| p.name().to_string()) else {
        return Ok(PlayState::Ended);
    };

    if session.state().is_color_pending() {
        let color = Color::ALL[rng.gen_range_usize(0..Color::ALL.len())];
        return Ok(session.setcolor(&name, &color.letter().to_string())?.play_state);
    }

    let playable = session.playable_cards(&name);
    if !playable.is_empty() {
        let code = playable[rng.gen_range_usize(0..playable.len())].card.shorthand();
        return Ok(session.play(&name, &code, None)?.play_state);
    }

    let drawn = session.player(&name).is_some_and(Player::has_drawn);
    if drawn || session.state() == GameState::WaitingAnswerToDraw {
        Ok(session.skip(&name)?.play_state)
    } else {
        Ok(session.pick(&name)?.play_state)
    }
}

fn pending_allowed(state: GameState) -> bool {
    matches!(
        state,
        GameState::WaitingAnswerToDraw
            | GameState::WaitingColorAfterWildDraw
            | GameState::WaitingColorAfterWildDrawSkip
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random games never lose, duplicate or strand a card.
    #[test]
    fn prop_random_games_keep_every_card(
        seed in any::<u64>(),
        seats in 2usize..=6,
        ruleset in arb_ruleset(),
    ) {
        let mut session = started(seed, seats, ruleset);
        prop_assert_eq!(session.check_invariants(), Ok(()));
        let mut rng = GameRng::new(seed.wrapping_add(1));

        for step in 0..400 {
            if session.state().is_terminal() {
                break;
            }
            // Now and then someone walks away from the table
            if step % 97 == 96 && session.players().len() > 2 {
                let leaving = session.players()[0].name().to_string();
                session.remove_player(&leaving).unwrap();
            }

            let result = act(&mut session, &mut rng).unwrap();
            prop_assert!(
                result.is_success() || result == PlayState::CantPick,
                "step {} gave {:?}", step, result
            );
            prop_assert_eq!(session.check_invariants(), Ok(()));

            let state = session.state();
            prop_assert!(
                !state.is_in_progress() || session.pending_draw() == 0 || pending_allowed(state),
                "{} cards pending in {:?}", session.pending_draw(), state
            );
            if result == PlayState::Won {
                prop_assert!(session.players().iter().any(Player::has_won));
            }
        }
    }

    /// Every player starts with a full hand, plus the opening penalty
    /// for the first player when a draw two is turned up in classic rules.
    #[test]
    fn prop_deal_fills_hands(seed in any::<u64>(), seats in 2usize..=10) {
        let session = started(seed, seats, Ruleset::Classic);
        let dealt: usize = session.players().iter().map(Player::card_count).sum();
        let opening = session.current_card().unwrap().card;

        let penalty = if opening.attributes == Attributes::DrawSkip { 2 } else { 0 };
        let expected = seats * 7 + penalty;
        prop_assert_eq!(dealt, expected);
        prop_assert_eq!(
            session.draw_pile().len() + dealt + 1,
            DECK_SIZE
        );
    }

    /// Two identical numerals played together move the turn one seat,
    /// whatever the table size.
    #[test]
    fn prop_double_play_takes_one_turn(
        seed in any::<u64>(),
        seats in 2usize..=10,
        rank in 1u8..=9,
    ) {
        let names: Vec<String> = (0..seats).map(|i| format!("p{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let code = format!("r{rank}");
        let opening = format!("g{rank}");

        let (mut session, _) = SessionBuilder::new()
            .seed(seed)
            .players(&names)
            .hand("p0", &[code.as_str(), code.as_str()])
            .opening(&opening)
            .start()
            .unwrap();
        // Both copies of the opening card may have been dealt
        prop_assume!(session.current_card().map(|c| c.card.shorthand()) == Some(opening));

        let response = session.play("p0", &code, Some(&code)).unwrap();
        prop_assert_eq!(response.play_state, PlayState::ValidDoublePlay);
        prop_assert_eq!(session.current_player().map(Player::name), Some("p1"));
        prop_assert_eq!(session.check_invariants(), Ok(()));
    }

    /// Every card's shorthand is canonical and finds that kind of card.
    #[test]
    fn prop_shorthand_is_canonical(index in 0usize..DECK_SIZE, upper in any::<bool>()) {
        let arena = CardArena::populate(Ruleset::Classic);
        let reference = Deck::reference(&arena);
        let (handle, card) = arena.iter().nth(index).unwrap();

        let code = card.shorthand();
        let typed = if upper { code.to_ascii_uppercase() } else { code.clone() };
        prop_assert_eq!(canonical_code(&typed), Some(code.clone()));

        let (found, _) = reference.lookup(&code, None);
        let found = found.unwrap();
        prop_assert_eq!(arena.shorthand(found), arena.shorthand(handle));
    }
}
