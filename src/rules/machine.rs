//! Turn state machine.
//!
//! The machine decides which operations are legal at any point of a game.
//! It only knows about game states and the inputs that move between them;
//! who plays next is tracked separately by the session's turn cursor.
//!
//! ```text
//! WaitingPlayers ──Begin──▶ Playing ──PlayedWild──▶ WaitingColorAfterWild
//!                                   ◀──ColorChosen──
//! Playing ──PlayedDraw──▶ WaitingAnswerToDraw ──DrawResolved──▶ Playing
//! any non-terminal ──GameEnded──▶ Ended
//! ```

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// Phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Accepting players; the game has not started.
    #[default]
    WaitingPlayers,
    /// Normal play.
    Playing,
    /// A wild was played; its player must choose a color.
    WaitingColorAfterWild,
    /// A wild draw card (no-skip ruleset) was played; color first, then the
    /// next player must answer the draw.
    WaitingColorAfterWildDraw,
    /// A wild draw card (classic ruleset) was played; color first, then the
    /// next player draws and is skipped.
    WaitingColorAfterWildDrawSkip,
    /// A draw card is pending; the current player may stack or absorb it.
    WaitingAnswerToDraw,
    /// Terminal.
    Ended,
}

impl GameState {
    /// Is a color choice pending?
    #[must_use]
    pub const fn is_color_pending(self) -> bool {
        matches!(
            self,
            GameState::WaitingColorAfterWild
                | GameState::WaitingColorAfterWildDraw
                | GameState::WaitingColorAfterWildDrawSkip
        )
    }

    /// Has the game started and not yet ended?
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        !matches!(self, GameState::WaitingPlayers | GameState::Ended)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Ended)
    }
}

/// Events fed to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameInput {
    /// The game starts with no pending effect.
    Begin,
    PlayedWild,
    PlayedWildDraw,
    PlayedWildDrawSkip,
    PlayedDraw,
    PlayedDrawSkip,
    ColorChosen,
    /// A pending draw was applied to its victim.
    DrawResolved,
    GameEnded,
}

/// The transition table. `None` for undefined edges.
#[must_use]
pub const fn transition(state: GameState, input: GameInput) -> Option<GameState> {
    use GameInput as I;
    use GameState as S;

    let next = match (state, input) {
        (S::Ended, _) => return None,
        (_, I::GameEnded) => S::Ended,

        (S::WaitingPlayers, I::Begin) => S::Playing,
        (S::WaitingPlayers, I::PlayedWild) => S::WaitingColorAfterWild,
        (S::WaitingPlayers, I::PlayedDraw) => S::WaitingAnswerToDraw,
        (S::WaitingPlayers, I::PlayedDrawSkip) => S::Playing,

        (S::Playing, I::PlayedWild) => S::WaitingColorAfterWild,
        (S::Playing, I::PlayedWildDraw) => S::WaitingColorAfterWildDraw,
        (S::Playing, I::PlayedWildDrawSkip) => S::WaitingColorAfterWildDrawSkip,
        (S::Playing, I::PlayedDraw) => S::WaitingAnswerToDraw,
        (S::Playing, I::PlayedDrawSkip) => S::Playing,

        (S::WaitingColorAfterWild, I::ColorChosen) => S::Playing,
        (S::WaitingColorAfterWildDraw, I::ColorChosen) => S::WaitingAnswerToDraw,
        (S::WaitingColorAfterWildDrawSkip, I::ColorChosen) => S::Playing,

        (S::WaitingAnswerToDraw, I::DrawResolved) => S::Playing,
        (S::WaitingAnswerToDraw, I::PlayedDraw) => S::WaitingAnswerToDraw,
        (S::WaitingAnswerToDraw, I::PlayedWildDraw) => S::WaitingColorAfterWildDraw,

        _ => return None,
    };
    Some(next)
}

/// Holds the current state and applies inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMachine {
    state: GameState,
}

impl TurnMachine {
    /// A machine in `WaitingPlayers`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Apply an input. Undefined edges leave the state unchanged.
    pub fn apply(&mut self, input: GameInput) -> Result<GameState, EngineError> {
        let next = transition(self.state, input).ok_or(EngineError::IllegalTransition {
            state: self.state,
            input,
        })?;
        log::debug!("turn machine: {:?} --{:?}--> {:?}", self.state, input, next);
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [GameState; 7] = [
        GameState::WaitingPlayers,
        GameState::Playing,
        GameState::WaitingColorAfterWild,
        GameState::WaitingColorAfterWildDraw,
        GameState::WaitingColorAfterWildDrawSkip,
        GameState::WaitingAnswerToDraw,
        GameState::Ended,
    ];

    #[test]
    fn test_start_paths() {
        use GameInput::*;
        use GameState::*;

        assert_eq!(transition(WaitingPlayers, Begin), Some(Playing));
        assert_eq!(transition(WaitingPlayers, PlayedWild), Some(WaitingColorAfterWild));
        assert_eq!(transition(WaitingPlayers, PlayedDraw), Some(WaitingAnswerToDraw));
        assert_eq!(transition(WaitingPlayers, PlayedDrawSkip), Some(Playing));
        assert_eq!(transition(WaitingPlayers, PlayedWildDraw), None);
        assert_eq!(transition(WaitingPlayers, ColorChosen), None);
    }

    #[test]
    fn test_color_choice_paths() {
        use GameInput::*;
        use GameState::*;

        assert_eq!(transition(WaitingColorAfterWild, ColorChosen), Some(Playing));
        assert_eq!(
            transition(WaitingColorAfterWildDraw, ColorChosen),
            Some(WaitingAnswerToDraw)
        );
        assert_eq!(transition(WaitingColorAfterWildDrawSkip, ColorChosen), Some(Playing));
        assert_eq!(transition(WaitingColorAfterWild, PlayedDraw), None);
    }

    #[test]
    fn test_stacking_paths() {
        use GameInput::*;
        use GameState::*;

        assert_eq!(transition(WaitingAnswerToDraw, PlayedDraw), Some(WaitingAnswerToDraw));
        assert_eq!(
            transition(WaitingAnswerToDraw, PlayedWildDraw),
            Some(WaitingColorAfterWildDraw)
        );
        assert_eq!(transition(WaitingAnswerToDraw, DrawResolved), Some(Playing));
        assert_eq!(transition(WaitingAnswerToDraw, PlayedWild), None);
        assert_eq!(transition(Playing, DrawResolved), None);
    }

    #[test]
    fn test_game_ended_from_any_live_state() {
        for state in ALL_STATES {
            let expected = (state != GameState::Ended).then_some(GameState::Ended);
            assert_eq!(transition(state, GameInput::GameEnded), expected, "{state:?}");
        }
    }

    #[test]
    fn test_ended_is_terminal() {
        let inputs = [
            GameInput::Begin,
            GameInput::PlayedWild,
            GameInput::ColorChosen,
            GameInput::DrawResolved,
            GameInput::GameEnded,
        ];
        for input in inputs {
            assert_eq!(transition(GameState::Ended, input), None);
        }
    }

    #[test]
    fn test_machine_apply() {
        let mut machine = TurnMachine::new();
        assert_eq!(machine.state(), GameState::WaitingPlayers);

        assert_eq!(machine.apply(GameInput::Begin), Ok(GameState::Playing));
        assert_eq!(
            machine.apply(GameInput::PlayedWildDraw),
            Ok(GameState::WaitingColorAfterWildDraw)
        );
        assert!(transition(machine.state(), GameInput::ColorChosen).is_some());
        assert!(transition(machine.state(), GameInput::Begin).is_none());
    }

    #[test]
    fn test_machine_rejects_undefined_edge() {
        let mut machine = TurnMachine::new();
        let err = machine.apply(GameInput::ColorChosen).unwrap_err();

        assert_eq!(
            err,
            EngineError::IllegalTransition {
                state: GameState::WaitingPlayers,
                input: GameInput::ColorChosen,
            }
        );
        assert_eq!(machine.state(), GameState::WaitingPlayers);
    }

    #[test]
    fn test_state_predicates() {
        assert!(GameState::WaitingColorAfterWildDraw.is_color_pending());
        assert!(!GameState::WaitingAnswerToDraw.is_color_pending());
        assert!(GameState::WaitingAnswerToDraw.is_in_progress());
        assert!(!GameState::WaitingPlayers.is_in_progress());
        assert!(!GameState::Ended.is_in_progress());
        assert!(GameState::Ended.is_terminal());
    }
}
