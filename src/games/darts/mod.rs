//! Darts match scoring.

mod game;
mod types;

pub use game::{DartsGame, GameError, ThrowCall, ThrowOutcome};
pub use types::{MatchHistory, MatchStatus, Player, Seat, TurnRecord};
