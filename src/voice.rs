//! Voice I/O collaborator: spoken prompts out, recognized utterances in.
//!
//! The scoring core never talks to audio hardware. It sees [`VoiceIo`]:
//! `speak` completes before returning, `listen` blocks for one utterance
//! and hands back best-effort text — an empty string on recognition
//! failure, never an error. Which recognition backend actually produces
//! that text is a [`RecognizerChoice`] over a primary/secondary pair of
//! [`SpeechBackend`]s, selected here and invisible to the core.

use derive_more::{Display, Error};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Voice device error.
#[derive(Debug, Clone, Display, Error)]
#[display("Voice error: {} at {}:{}", message, file, line)]
pub struct VoiceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl VoiceError {
    /// Creates a new voice error with caller location tracking.
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

/// Renders one prompt to the player. Must complete before returning.
pub trait TtsBackend {
    /// Speaks the text.
    fn say(&mut self, text: &str) -> Result<(), VoiceError>;
}

/// Captures one utterance and returns best-effort recognized text.
///
/// An empty string means the backend heard nothing usable; errors are for
/// device-level failures only.
pub trait SpeechBackend {
    /// Blocks until one utterance is captured.
    fn recognize(&mut self) -> Result<String, VoiceError>;
}

/// Which recognition backend(s) a [`VoicePipeline`] consults.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecognizerChoice {
    /// Only the primary backend.
    PrimaryOnly,
    /// Only the secondary backend.
    SecondaryOnly,
    /// Primary first; secondary only when the primary hears nothing.
    #[default]
    PrimaryWithFallback,
}

/// Full voice collaborator: one speaker plus a recognizer pair.
pub struct VoicePipeline {
    tts: Box<dyn TtsBackend>,
    primary: Box<dyn SpeechBackend>,
    secondary: Box<dyn SpeechBackend>,
    choice: RecognizerChoice,
}

impl VoicePipeline {
    /// Creates a pipeline from explicit parts.
    pub fn new(
        tts: Box<dyn TtsBackend>,
        primary: Box<dyn SpeechBackend>,
        secondary: Box<dyn SpeechBackend>,
        choice: RecognizerChoice,
    ) -> Self {
        Self {
            tts,
            primary,
            secondary,
            choice,
        }
    }

    /// Console stand-in: prompts go to stdout, utterances are typed lines.
    /// Both recognizer slots read the same console until a real speech
    /// backend is wired in.
    pub fn console(choice: RecognizerChoice) -> Self {
        Self::new(
            Box::new(ConsoleTts),
            Box::new(ConsoleBackend::new()),
            Box::new(ConsoleBackend::new()),
            choice,
        )
    }

    fn capture(backend: &mut dyn SpeechBackend) -> String {
        match backend.recognize() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Recognition backend failed, treating as silence");
                String::new()
            }
        }
    }
}

/// The contract the scoring session programs against.
pub trait VoiceIo {
    /// Speaks one prompt; completes before returning.
    fn speak(&mut self, text: &str) -> Result<(), VoiceError>;

    /// Blocks for one utterance; empty string on recognition failure.
    fn listen(&mut self) -> String;
}

impl VoiceIo for VoicePipeline {
    #[instrument(skip(self))]
    fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        debug!("Speaking prompt");
        self.tts.say(text)
    }

    #[instrument(skip(self), fields(choice = %self.choice))]
    fn listen(&mut self) -> String {
        let text = match self.choice {
            RecognizerChoice::PrimaryOnly => Self::capture(self.primary.as_mut()),
            RecognizerChoice::SecondaryOnly => Self::capture(self.secondary.as_mut()),
            RecognizerChoice::PrimaryWithFallback => {
                let heard = Self::capture(self.primary.as_mut());
                if heard.is_empty() {
                    debug!("Primary heard nothing, falling back");
                    Self::capture(self.secondary.as_mut())
                } else {
                    heard
                }
            }
        };
        debug!(text = %text, "Utterance captured");
        text
    }
}

/// Speaks by writing to stdout.
#[derive(Debug, Default)]
pub struct ConsoleTts;

impl TtsBackend for ConsoleTts {
    fn say(&mut self, text: &str) -> Result<(), VoiceError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text).map_err(|e| VoiceError::new(format!("stdout failed: {}", e)))
    }
}

/// Reads one line from stdin per utterance.
#[derive(Debug, Default)]
pub struct ConsoleBackend;

impl ConsoleBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SpeechBackend for ConsoleBackend {
    fn recognize(&mut self) -> Result<String, VoiceError> {
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| VoiceError::new(format!("stdin failed: {}", e)))?;
        if read == 0 {
            // EOF reads as silence, same as a recognizer hearing nothing.
            return Ok(String::new());
        }
        Ok(line.trim().to_lowercase())
    }
}

/// Backend that replays a fixed script, then hears nothing.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: VecDeque<String>,
}

impl ScriptedBackend {
    /// Creates a backend that returns the given utterances in order and an
    /// empty string once the script runs dry.
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
        }
    }
}

impl SpeechBackend for ScriptedBackend {
    fn recognize(&mut self) -> Result<String, VoiceError> {
        Ok(self.script.pop_front().unwrap_or_default())
    }
}

/// [`VoiceIo`] double that replays utterances and records spoken prompts.
///
/// `listen` panics once the script runs dry, so a dialogue that would loop
/// forever shows up as a failed test instead of a hung run.
#[derive(Debug, Default)]
pub struct ScriptedVoice {
    heard: VecDeque<String>,
    spoken: Vec<String>,
}

impl ScriptedVoice {
    /// Creates a double that hears the given utterances in order.
    pub fn new<I, S>(heard: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heard: heard.into_iter().map(Into::into).collect(),
            spoken: Vec::new(),
        }
    }

    /// Every prompt spoken so far, in order.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }
}

impl VoiceIo for ScriptedVoice {
    fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        self.spoken.push(text.to_string());
        Ok(())
    }

    fn listen(&mut self) -> String {
        match self.heard.pop_front() {
            Some(text) => text.to_lowercase(),
            None => panic!(
                "scripted voice ran dry; spoken so far: {:?}",
                self.spoken
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingBackend {
        inner: ScriptedBackend,
        calls: Rc<Cell<usize>>,
    }

    impl SpeechBackend for CountingBackend {
        fn recognize(&mut self) -> Result<String, VoiceError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.recognize()
        }
    }

    fn counting(script: &[&str]) -> (CountingBackend, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            CountingBackend {
                inner: ScriptedBackend::new(script.iter().copied()),
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }

    fn pipeline(
        primary: CountingBackend,
        secondary: CountingBackend,
        choice: RecognizerChoice,
    ) -> VoicePipeline {
        VoicePipeline::new(
            Box::new(NullTts),
            Box::new(primary),
            Box::new(secondary),
            choice,
        )
    }

    struct NullTts;

    impl TtsBackend for NullTts {
        fn say(&mut self, _text: &str) -> Result<(), VoiceError> {
            Ok(())
        }
    }

    #[test]
    fn fallback_consults_secondary_only_on_silence() {
        let (primary, primary_calls) = counting(&["", "twenty"]);
        let (secondary, secondary_calls) = counting(&["seven"]);
        let mut voice = pipeline(primary, secondary, RecognizerChoice::PrimaryWithFallback);

        assert_eq!(voice.listen(), "seven");
        assert_eq!(voice.listen(), "twenty");
        assert_eq!(primary_calls.get(), 2);
        assert_eq!(secondary_calls.get(), 1);
    }

    #[test]
    fn primary_only_never_touches_secondary() {
        let (primary, _) = counting(&[""]);
        let (secondary, secondary_calls) = counting(&["seven"]);
        let mut voice = pipeline(primary, secondary, RecognizerChoice::PrimaryOnly);

        assert_eq!(voice.listen(), "");
        assert_eq!(secondary_calls.get(), 0);
    }

    #[test]
    fn secondary_only_never_touches_primary() {
        let (primary, primary_calls) = counting(&["loud"]);
        let (secondary, _) = counting(&["quiet"]);
        let mut voice = pipeline(primary, secondary, RecognizerChoice::SecondaryOnly);

        assert_eq!(voice.listen(), "quiet");
        assert_eq!(primary_calls.get(), 0);
    }

    #[test]
    fn choice_parses_from_kebab_case() {
        let choice: RecognizerChoice = "primary-with-fallback".parse().unwrap();
        assert_eq!(choice, RecognizerChoice::PrimaryWithFallback);
        assert_eq!(RecognizerChoice::SecondaryOnly.to_string(), "secondary-only");
    }
}
