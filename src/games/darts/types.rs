//! Core domain types for a darts match.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Seat at the oche. A match is strictly two players, so the active
/// player is addressed by seat and rotation is a deterministic swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// First seat.
    One,
    /// Second seat.
    Two,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Index into per-seat storage.
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// A player in the match. Created once during setup; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Display name, unique within the match.
    name: String,
}

impl Player {
    /// Creates a player with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An archived turn: who threw, and the throw values in order.
///
/// A busted turn carries the busting value as its last entry even though
/// that value never counted toward the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct TurnRecord {
    /// Display name of the thrower.
    player: String,
    /// Throw values in the order they were called.
    throws: Vec<u32>,
}

/// Append-only record of every archived turn, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    records: Vec<TurnRecord>,
}

impl MatchHistory {
    /// Returns the archived turns, oldest first.
    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    /// Number of archived turns.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no turn has been archived yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(super) fn push(&mut self, record: TurnRecord) {
        self.records.push(record);
    }
}

/// Current status of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Match is ongoing.
    InProgress,
    /// Match ended; the seat holds the winner.
    Over(Seat),
}
