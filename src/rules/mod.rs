//! Game rules: the turn state machine and the response types.
//!
//! The machine (`TurnMachine`) governs which operations are legal; the
//! session feeds it inputs as cards are played. Operations report back
//! through `Response`, whose `PlayState` says what happened and whose
//! `Outcome` carries the side effects.

pub mod machine;
pub mod outcome;

pub use machine::{transition, GameInput, GameState, TurnMachine};
pub use outcome::{
    CardRef, JoinOutcome, Outcome, PlayState, Response, ScoreEntry, SeatSummary, TableSummary,
};
