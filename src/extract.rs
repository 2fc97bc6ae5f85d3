//! Number extraction from recognized speech.

use regex::Regex;
use tracing::{debug, instrument};

/// Resolves free-form recognized text into a single integer.
///
/// Implementations report `Some` if, and only if, the text unambiguously
/// encodes exactly one number; zero or multiple candidates are "not found",
/// never partial output.
pub trait NumberExtractor {
    /// Returns the unique integer encoded in `text`, or `None`.
    fn extract_single_integer(&self, text: &str) -> Option<u32>;
}

/// Extractor that takes bare digit runs from the text.
///
/// "sixty" stays unresolved on purpose: turning number words into digits is
/// the recognizer's job, not this crate's.
#[derive(Debug, Clone)]
pub struct DigitExtractor {
    digits: Regex,
}

impl DigitExtractor {
    /// Creates the extractor.
    pub fn new() -> Self {
        Self {
            digits: Regex::new(r"\d+").expect("digit pattern compiles"),
        }
    }
}

impl Default for DigitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberExtractor for DigitExtractor {
    #[instrument(skip(self))]
    fn extract_single_integer(&self, text: &str) -> Option<u32> {
        let mut matches = self.digits.find_iter(text);
        let first = matches.next()?;
        if matches.next().is_some() {
            debug!("More than one number in utterance");
            return None;
        }
        // A digit run too long for u32 is as unusable as no number at all.
        first.as_str().parse().ok()
    }
}

/// Extractor that returns a preset answer. Test double.
#[derive(Debug, Clone)]
pub struct FixedExtractor {
    value: Option<u32>,
}

impl FixedExtractor {
    /// Always resolves to `value`.
    pub fn some(value: u32) -> Self {
        Self { value: Some(value) }
    }

    /// Never resolves.
    pub fn none() -> Self {
        Self { value: None }
    }
}

impl NumberExtractor for FixedExtractor {
    fn extract_single_integer(&self, _text: &str) -> Option<u32> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_number_resolves() {
        let extractor = DigitExtractor::new();
        assert_eq!(extractor.extract_single_integer("60"), Some(60));
        assert_eq!(extractor.extract_single_integer("i scored 45 points"), Some(45));
    }

    #[test]
    fn zero_or_many_numbers_do_not_resolve() {
        let extractor = DigitExtractor::new();
        assert_eq!(extractor.extract_single_integer(""), None);
        assert_eq!(extractor.extract_single_integer("no idea"), None);
        assert_eq!(extractor.extract_single_integer("3 20"), None);
    }

    #[test]
    fn overflowing_digit_run_does_not_resolve() {
        let extractor = DigitExtractor::new();
        assert_eq!(extractor.extract_single_integer("99999999999999999999"), None);
    }
}
