//! Voice-driven match orchestration.
//!
//! [`MatchSession`] is the dialogue around the scoring core: it enrolls the
//! players by voice, flips for the opening seat, feeds every recognized
//! utterance through resolution into the engine, renders the announcements,
//! and hands the finished history to the store. All collaborator calls are
//! synchronous; the session blocks on each one in turn.

use crate::config::MatchConfig;
use crate::extract::NumberExtractor;
use crate::games::darts::{DartsGame, MatchStatus, Player, Seat, ThrowCall, ThrowOutcome};
use crate::history::HistoryStore;
use crate::voice::VoiceIo;
use chrono::Utc;
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Answers that reject a name confirmation.
const NO_WORDS: [&str; 2] = ["no", "нет"];

/// Session error: a collaborator failed underneath the dialogue.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", message, file, line)]
pub struct SessionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<crate::voice::VoiceError> for SessionError {
    #[track_caller]
    fn from(err: crate::voice::VoiceError) -> Self {
        Self::new(format!("Voice failure: {}", err.message))
    }
}

impl From<crate::history::HistoryError> for SessionError {
    #[track_caller]
    fn from(err: crate::history::HistoryError) -> Self {
        Self::new(format!("History failure: {}", err.message))
    }
}

impl From<crate::games::darts::GameError> for SessionError {
    #[track_caller]
    fn from(err: crate::games::darts::GameError) -> Self {
        Self::new(format!("Engine rejected a throw: {}", err))
    }
}

/// Summary of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchReport {
    /// Winner's display name.
    winner: String,
    /// Number of archived turns.
    turns: usize,
    /// RFC 3339 match-start timestamp the history was recorded under.
    timestamp: String,
}

/// One voice-scored match from enrollment to the recorded result.
pub struct MatchSession<'a> {
    voice: &'a mut dyn VoiceIo,
    extractor: &'a dyn NumberExtractor,
    store: &'a dyn HistoryStore,
    config: MatchConfig,
    starting_seat: Option<Seat>,
}

impl<'a> MatchSession<'a> {
    /// Creates a session over the given collaborators.
    pub fn new(
        voice: &'a mut dyn VoiceIo,
        extractor: &'a dyn NumberExtractor,
        store: &'a dyn HistoryStore,
        config: MatchConfig,
    ) -> Self {
        Self {
            voice,
            extractor,
            store,
            config,
            starting_seat: None,
        }
    }

    /// Fixes the opening thrower instead of flipping for one.
    pub fn with_starting_seat(mut self, seat: Seat) -> Self {
        self.starting_seat = Some(seat);
        self
    }

    /// Runs one match to completion and records it.
    ///
    /// # Errors
    ///
    /// Only collaborator failures surface here; nothing in the scoring rules
    /// is fatal. Unrecognized or implausible throws loop on a retry prompt.
    #[instrument(skip(self))]
    pub fn run(mut self) -> Result<MatchReport, SessionError> {
        let started_at = Utc::now().to_rfc3339();

        self.voice.speak("Let's start a new game")?;
        let players = self.enroll_players()?;
        self.voice.speak("Players saved")?;

        let starting = self.starting_seat.unwrap_or_else(|| {
            if rand::rng().random_bool(0.5) {
                Seat::One
            } else {
                Seat::Two
            }
        });
        let mut game = DartsGame::new(players, starting, self.config.clone());

        self.voice.speak("Starting the game")?;
        self.announce_thrower(&game)?;

        let winner = loop {
            if let MatchStatus::Over(seat) = game.status() {
                break seat;
            }
            self.next_throw(&mut game)?;
        };

        let winner_name = game.player(winner).name().clone();
        self.voice
            .speak(&format!("The winner is {}", winner_name))?;

        self.store
            .append_match(&started_at, game.history().records())?;
        info!(winner = %winner_name, turns = game.history().len(), "Match complete");

        Ok(MatchReport {
            winner: winner_name,
            turns: game.history().len(),
            timestamp: started_at,
        })
    }

    /// Enrolls both players by voice, one slot at a time.
    #[instrument(skip(self))]
    fn enroll_players(&mut self) -> Result<[Player; 2], SessionError> {
        let first = self.enroll_player(1)?;
        let second = self.enroll_player(2)?;
        Ok([first, second])
    }

    /// Asks for one slot's name until the player confirms it.
    fn enroll_player(&mut self, slot: usize) -> Result<Player, SessionError> {
        loop {
            self.voice.speak(&format!("Name player {}", slot))?;
            let heard = self.voice.listen();
            let name = capitalize(heard.trim());
            if name.is_empty() {
                debug!(slot, "Heard no name");
                continue;
            }

            self.voice.speak(&format!(
                "Player {} is called {}, is that right?",
                slot, name
            ))?;
            let answer = self.voice.listen();
            if NO_WORDS.iter().any(|word| answer.contains(word)) {
                debug!(slot, name = %name, "Name rejected, asking again");
                continue;
            }

            info!(slot, name = %name, "Player enrolled");
            return Ok(Player::new(name));
        }
    }

    /// Captures, resolves, and applies one throw attempt.
    fn next_throw(&mut self, game: &mut DartsGame) -> Result<(), SessionError> {
        let heard = self.voice.listen();
        match game.resolve_throw_text(&heard, self.extractor) {
            ThrowCall::Unresolved => {
                debug!(heard = %heard, "Throw not resolved");
                self.voice.speak("Repeat the throw, please")?;
            }
            ThrowCall::Implausible(value) => {
                warn!(value, "Implausible throw called");
                self.voice.speak("Nice try. Now tell me the honest score")?;
            }
            ThrowCall::Valid(value) => match game.apply_throw(value)? {
                ThrowOutcome::Continued { remaining, .. } => {
                    debug!(value, remaining, "Throw scored");
                }
                ThrowOutcome::TurnOver { .. } => {
                    self.announce_thrower(game)?;
                }
                ThrowOutcome::Bust { .. } => {
                    self.voice.speak("Bust")?;
                    self.announce_thrower(game)?;
                }
                ThrowOutcome::Finished { .. } => {
                    debug!(value, "Winning throw");
                }
            },
        }
        Ok(())
    }

    /// Announces whose throw it is and what they still need.
    fn announce_thrower(&mut self, game: &DartsGame) -> Result<(), SessionError> {
        let seat = game.current_seat();
        self.voice
            .speak(&format!("{} to throw", game.player(seat).name()))?;
        self.voice
            .speak(&format!("{} points to go", game.score_of(seat)))?;
        Ok(())
    }
}

/// Uppercases the first letter, keeps the rest as recognized.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
