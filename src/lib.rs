//! Strictly Darts library - voice-scored darts for two players.
//!
//! # Architecture
//!
//! - **Engine**: the darts scoring state machine ([`DartsGame`]) - scores,
//!   turns, bust detection, rotation, win detection
//! - **Voice**: spoken prompts and recognized utterances behind [`VoiceIo`]
//! - **Extraction**: one integer out of free-form text ([`NumberExtractor`])
//! - **History**: finished matches persisted through [`HistoryStore`]
//! - **Session**: the dialogue that wires the engine to its collaborators
//!
//! # Example
//!
//! ```
//! use strictly_darts::{DartsGame, MatchConfig, Player, Seat};
//!
//! let mut game = DartsGame::new(
//!     [Player::new("Alice"), Player::new("Bob")],
//!     Seat::One,
//!     MatchConfig::default(),
//! );
//! let outcome = game.apply_throw(60)?;
//! # let _ = outcome;
//! # Ok::<(), strictly_darts::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod extract;
mod games;
mod history;
mod session;
mod voice;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{
    ConfigError, MatchConfig, DEFAULT_MAX_THROW, DEFAULT_STARTING_SCORE, DEFAULT_THROWS_PER_TURN,
};

// Crate-level exports - Number extraction
pub use extract::{DigitExtractor, FixedExtractor, NumberExtractor};

// Crate-level exports - Game types (darts)
pub use games::darts::{
    DartsGame, GameError, MatchHistory, MatchStatus, Player, Seat, ThrowCall, ThrowOutcome,
    TurnRecord,
};

// Crate-level exports - History persistence
pub use history::{HistoryError, HistoryStore, JsonFileStore, MatchLog, MemoryStore};

// Crate-level exports - Session orchestration
pub use session::{MatchReport, MatchSession, SessionError};

// Crate-level exports - Voice I/O
pub use voice::{
    ConsoleBackend, ConsoleTts, RecognizerChoice, ScriptedBackend, ScriptedVoice, SpeechBackend,
    TtsBackend, VoiceError, VoiceIo, VoicePipeline,
};
