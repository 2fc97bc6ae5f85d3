//! Scoring rules and the turn state machine for a darts match.
//!
//! [`DartsGame`] owns the whole match state and is the only place it is
//! mutated. One validated throw goes in through [`DartsGame::apply_throw`];
//! a [`ThrowOutcome`] comes back describing the transition. Invalid input
//! never reaches `apply_throw` — [`DartsGame::resolve_throw_text`] filters
//! it into a retryable [`ThrowCall`] first.

use super::types::{MatchHistory, MatchStatus, Player, Seat, TurnRecord};
use crate::config::MatchConfig;
use crate::extract::NumberExtractor;
use tracing::{debug, info, instrument, warn};

/// Outcome of resolving one utterance into a throw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowCall {
    /// The text resolved to a plausible throw value.
    Valid(u32),
    /// The text yielded zero or more than one number; ask the player to repeat.
    Unresolved,
    /// The resolved value exceeds the maximum plausible throw; ask for an
    /// honest one. Carries the value that was claimed.
    Implausible(u32),
}

/// Result of applying one valid throw - explicit state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    /// Throw applied; the same player keeps throwing this turn.
    Continued {
        /// Seat that threw.
        seat: Seat,
        /// Points the thrower still needs.
        remaining: u32,
        /// Throws left in this turn.
        throws_left: usize,
    },
    /// Throw applied and the turn filled up; play rotated.
    TurnOver {
        /// Seat that throws next.
        next: Seat,
        /// Points the next thrower still needs.
        next_remaining: u32,
    },
    /// Throw would cross zero. The turn-start score is restored, the turn
    /// is archived as thrown, and play rotates.
    Bust {
        /// Seat that busted.
        seat: Seat,
        /// Score after the refund (the value at turn start).
        restored: u32,
        /// Seat that throws next.
        next: Seat,
        /// Points the next thrower still needs.
        next_remaining: u32,
    },
    /// Exact finish; the thrower wins and the match is over.
    Finished {
        /// Seat that won.
        winner: Seat,
    },
}

/// Errors from the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A throw was applied after the match reached its terminal state.
    MatchOver,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::MatchOver => write!(f, "Match is already over"),
        }
    }
}

impl std::error::Error for GameError {}

/// Darts scoring engine for one two-player match.
///
/// Holds player scores, the in-progress turn, the archived history, and the
/// active seat. Scores only ever move in response to a validated throw, and
/// stay within `[0, starting_score]`.
#[derive(Debug, Clone)]
pub struct DartsGame {
    config: MatchConfig,
    players: [Player; 2],
    scores: [u32; 2],
    current: Seat,
    turn: Vec<u32>,
    history: MatchHistory,
    status: MatchStatus,
}

impl DartsGame {
    /// Creates a new match with both scores at the starting value.
    ///
    /// The opening seat is a caller decision (the session flips for it), not
    /// something the engine chooses.
    #[instrument(skip(players, config), fields(starting = %starting))]
    pub fn new(players: [Player; 2], starting: Seat, config: MatchConfig) -> Self {
        let starting_score = *config.starting_score();
        info!(
            player_one = %players[0].name(),
            player_two = %players[1].name(),
            starting_score,
            "Creating darts match"
        );
        Self {
            config,
            players,
            scores: [starting_score, starting_score],
            current: starting,
            turn: Vec::new(),
            history: MatchHistory::default(),
            status: MatchStatus::InProgress,
        }
    }

    /// Returns the match configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the seat currently throwing.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    /// Returns the player at the given seat.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Returns the points the given seat still needs.
    pub fn score_of(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    /// Returns the throws applied so far in the in-progress turn.
    pub fn current_turn(&self) -> &[u32] {
        &self.turn
    }

    /// Returns the archived match history.
    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Returns the match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Returns the winner once the match is over.
    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            MatchStatus::Over(seat) => Some(self.player(seat)),
            MatchStatus::InProgress => None,
        }
    }

    /// Resolves recognized speech for one throw into a [`ThrowCall`].
    ///
    /// A miss keyword anywhere in the text counts as a throw of zero, no
    /// matter what the extractor would say. Otherwise the extractor must
    /// find exactly one integer, and it must not exceed the configured
    /// maximum. Resolution never touches match state.
    #[instrument(skip(self, extractor))]
    pub fn resolve_throw_text(&self, text: &str, extractor: &dyn NumberExtractor) -> ThrowCall {
        let lowered = text.to_lowercase();
        if self
            .config
            .miss_words()
            .iter()
            .any(|word| lowered.contains(word.as_str()))
        {
            debug!("Miss keyword found, throw counts as zero");
            return ThrowCall::Valid(0);
        }

        match extractor.extract_single_integer(&lowered) {
            None => {
                debug!("No unambiguous number in utterance");
                ThrowCall::Unresolved
            }
            Some(value) if value > *self.config.max_throw() => {
                warn!(value, max = *self.config.max_throw(), "Implausible throw claimed");
                ThrowCall::Implausible(value)
            }
            Some(value) => ThrowCall::Valid(value),
        }
    }

    /// Applies one validated throw to the match state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MatchOver`] if the match already ended; no state
    /// changes in that case.
    #[instrument(skip(self), fields(seat = %self.current))]
    pub fn apply_throw(&mut self, value: u32) -> Result<ThrowOutcome, GameError> {
        if let MatchStatus::Over(_) = self.status {
            warn!("Throw applied after match end");
            return Err(GameError::MatchOver);
        }

        let seat = self.current;
        let idx = seat.index();

        match self.scores[idx].checked_sub(value) {
            None => {
                // Bust: refund the throws applied this turn, archive the
                // turn with the busting value on the end, rotate.
                let refund: u32 = self.turn.iter().sum();
                self.scores[idx] += refund;
                let restored = self.scores[idx];
                info!(value, refund, restored, "Bust");
                self.turn.push(value);
                self.archive_turn();
                let next = self.rotate();
                Ok(ThrowOutcome::Bust {
                    seat,
                    restored,
                    next,
                    next_remaining: self.score_of(next),
                })
            }
            Some(0) => {
                self.scores[idx] = 0;
                self.turn.push(value);
                self.archive_turn();
                self.status = MatchStatus::Over(seat);
                info!(winner = %self.players[idx].name(), "Match over");
                Ok(ThrowOutcome::Finished { winner: seat })
            }
            Some(remaining) => {
                self.scores[idx] = remaining;
                self.turn.push(value);
                debug!(remaining, turn = ?self.turn, "Throw scored");
                if self.turn.len() == *self.config.throws_per_turn() {
                    self.archive_turn();
                    let next = self.rotate();
                    Ok(ThrowOutcome::TurnOver {
                        next,
                        next_remaining: self.score_of(next),
                    })
                } else {
                    Ok(ThrowOutcome::Continued {
                        seat,
                        remaining,
                        throws_left: *self.config.throws_per_turn() - self.turn.len(),
                    })
                }
            }
        }
    }

    /// Closes the in-progress turn into the history.
    fn archive_turn(&mut self) {
        let throws = std::mem::take(&mut self.turn);
        debug!(player = %self.players[self.current.index()].name(), ?throws, "Archiving turn");
        self.history.push(TurnRecord::new(
            self.players[self.current.index()].name().clone(),
            throws,
        ));
    }

    /// Hands the current-player status to the other seat.
    fn rotate(&mut self) -> Seat {
        self.current = self.current.opponent();
        debug!(next = %self.current, "Rotated");
        self.current
    }
}
