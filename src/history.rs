//! Match history persistence.
//!
//! One finished match becomes one entry in a `timestamp → turns` mapping.
//! The shipped store keeps that mapping in a JSON file with read-modify-write
//! durability; the engine only ever hands over a finished, read-only history.

use crate::games::darts::TurnRecord;
use derive_more::{Display, Error};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// The persisted mapping: RFC 3339 match-start timestamp to archived turns.
pub type MatchLog = BTreeMap<String, Vec<TurnRecord>>;

/// History persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("History error: {} at {}:{}", message, file, line)]
pub struct HistoryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HistoryError {
    /// Creates a new history error with caller location tracking.
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

/// Where finished matches go.
pub trait HistoryStore {
    /// Merges one finished match into the persisted log.
    fn append_match(&self, timestamp: &str, turns: &[TurnRecord]) -> Result<(), HistoryError>;

    /// Reads the whole persisted log.
    fn load(&self) -> Result<MatchLog, HistoryError>;
}

/// JSON-file store with read-modify-write semantics.
///
/// A missing file and unparseable content both read as an empty log, so a
/// first run or a hand-mangled file never blocks recording a match.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonFileStore {
    #[instrument(skip(self, turns), fields(path = %self.path.display(), turns = turns.len()))]
    fn append_match(&self, timestamp: &str, turns: &[TurnRecord]) -> Result<(), HistoryError> {
        let mut log = self.load()?;
        log.insert(timestamp.to_string(), turns.to_vec());

        let serialized = serde_json::to_string(&log)
            .map_err(|e| HistoryError::new(format!("Failed to serialize history: {}", e)))?;
        std::fs::write(&self.path, serialized)
            .map_err(|e| HistoryError::new(format!("Failed to write history file: {}", e)))?;

        info!(timestamp, "Match recorded");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<MatchLog, HistoryError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file yet");
                return Ok(MatchLog::new());
            }
            Err(e) => {
                return Err(HistoryError::new(format!(
                    "Failed to read history file: {}",
                    e
                )));
            }
        };

        match serde_json::from_str(&content) {
            Ok(log) => Ok(log),
            Err(e) => {
                warn!(error = %e, "History file unparseable, starting empty");
                Ok(MatchLog::new())
            }
        }
    }
}

/// In-memory store. Test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    log: Mutex<MatchLog>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn append_match(&self, timestamp: &str, turns: &[TurnRecord]) -> Result<(), HistoryError> {
        self.log
            .lock()
            .unwrap()
            .insert(timestamp.to_string(), turns.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<MatchLog, HistoryError> {
        Ok(self.log.lock().unwrap().clone())
    }
}
