//! Builder for ready-to-play tables.
//!
//! Seats players in the given order (no seat shuffling) and optionally
//! fixes hands and the opening card, which makes games reproducible for
//! tests, benchmarks and replays.

use super::engine::Session;
use crate::core::{EngineError, Ruleset, SessionConfig, StartOptions};
use crate::rules::Response;

/// Builder for creating a `Session` with seated players.
///
/// ```
/// use rust_uno::core::Ruleset;
/// use rust_uno::rules::PlayState;
/// use rust_uno::session::SessionBuilder;
///
/// let (mut session, _) = SessionBuilder::new()
///     .ruleset(Ruleset::Classic)
///     .seed(3)
///     .players(&["alice", "bob"])
///     .hand("alice", &["r7", "r1", "b2", "b3", "g4", "g5", "y6"])
///     .hand("bob", &["y1", "y2", "g1", "g2", "b4", "b5", "b6"])
///     .opening("r5")
///     .start()
///     .unwrap();
///
/// let response = session.play("alice", "r7", None).unwrap();
/// assert_eq!(response.play_state, PlayState::ValidPlay);
/// ```
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    config: SessionConfig,
    players: Vec<String>,
    options: StartOptions,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: SessionConfig::default().keep_seat_order(),
            players: Vec::new(),
            options: StartOptions::default(),
        }
    }
}

impl SessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ruleset(mut self, ruleset: Ruleset) -> Self {
        self.config.ruleset = ruleset;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.config = self.config.with_hand_size(size);
        self
    }

    /// Seat players in this order.
    #[must_use]
    pub fn players(mut self, names: &[&str]) -> Self {
        self.players.extend(names.iter().map(|n| (*n).to_string()));
        self
    }

    /// Deal these cards to `player` before the random deal.
    #[must_use]
    pub fn hand(mut self, player: &str, codes: &[&str]) -> Self {
        self.options = self.options.preset(player, codes);
        self
    }

    /// Force the opening card.
    #[must_use]
    pub fn opening(mut self, code: &str) -> Self {
        self.options = self.options.opening(code);
        self
    }

    /// Create the session with every player seated, not started.
    #[must_use]
    pub fn build(self) -> Session {
        self.into_parts().0
    }

    /// Create and start the session.
    pub fn start(self) -> Result<(Session, Response), EngineError> {
        let (mut session, options) = self.into_parts();
        let response = session.start_with(options)?;
        Ok((session, response))
    }

    fn into_parts(self) -> (Session, StartOptions) {
        let mut session = Session::new(self.config);
        for name in &self.players {
            session.add_player(name);
        }
        (session, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GameState, PlayState};

    #[test]
    fn test_build_seats_players() {
        let session = SessionBuilder::new()
            .seed(1)
            .players(&["a", "b", "c"])
            .build();

        assert_eq!(session.state(), GameState::WaitingPlayers);
        assert_eq!(session.seat_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_start_keeps_order_and_presets() {
        let (session, response) = SessionBuilder::new()
            .ruleset(Ruleset::NoSkip)
            .seed(9)
            .players(&["a", "b"])
            .hand("a", &["r1", "r2", "r3", "g1", "g2", "g3", "b9"])
            .hand("b", &["j", "j+4", "y1", "y2", "b1", "b2", "b3"])
            .opening("y4")
            .start()
            .unwrap();

        assert_eq!(response.play_state, PlayState::JustStarted);
        assert_eq!(session.seat_order(), vec!["a", "b"]);
        assert_eq!(session.current_card().map(|c| c.card.shorthand()).as_deref(), Some("y4"));

        let b = session.player("b").unwrap();
        assert_eq!(b.card_count(), 7);
        assert!(b.hand().has_code("j"));
        assert!(b.hand().has_code("j+4"));
    }

    #[test]
    fn test_hand_size() {
        let (session, _) = SessionBuilder::new()
            .seed(2)
            .hand_size(3)
            .players(&["a", "b"])
            .hand("a", &["r2", "r3", "r4"])
            .hand("b", &["g2", "g3", "g4"])
            .opening("r1")
            .start()
            .unwrap();
        assert!(session.players().iter().all(|p| p.card_count() == 3));
    }
}
