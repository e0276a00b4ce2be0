//! Invariant checking over conversation transcripts.
//!
//! Invariants are properties every transcript must satisfy, whatever the user
//! typed. They complement example-based tests: a property test feeds random
//! input through a [`crate::SimSession`] and asserts the registry against
//! everything that was sent.
//!
//! ```
//! use parley_core::EngineConfig;
//! use parley_harness::{InvariantRegistry, Transcript};
//!
//! let config = EngineConfig::default();
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&Transcript::new(&[], &config), "empty transcript");
//! ```

use std::fmt;

use parley_core::{EngineConfig, OutboundMessage, numbered_caption};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Everything a session sent, plus the config it ran with.
#[derive(Debug, Clone, Copy)]
pub struct Transcript<'a> {
    /// Sends in delivery order.
    pub sent: &'a [OutboundMessage],
    /// Engine configuration of the session.
    pub config: &'a EngineConfig,
}

impl<'a> Transcript<'a> {
    /// Wrap a slice of sends.
    pub fn new(sent: &'a [OutboundMessage], config: &'a EngineConfig) -> Self {
        Self { sent, config }
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Index of the offending send.
    pub index: usize,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (send #{}): {}", self.invariant, self.index, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property that must hold for every transcript.
pub trait Invariant {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against a transcript.
    fn check(&self, transcript: &Transcript<'_>) -> InvariantResult;
}

/// No send carries empty text.
pub struct NonEmptyText;

impl Invariant for NonEmptyText {
    fn name(&self) -> &'static str {
        "non_empty_text"
    }

    fn check(&self, transcript: &Transcript<'_>) -> InvariantResult {
        match transcript.sent.iter().position(|message| message.text.is_empty()) {
            Some(index) => Err(Violation {
                invariant: self.name(),
                index,
                message: "empty text sent".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Keyboard labels are numbered 1..=n in row-major order.
pub struct NumberedKeyboard;

impl Invariant for NumberedKeyboard {
    fn name(&self) -> &'static str {
        "numbered_keyboard"
    }

    fn check(&self, transcript: &Transcript<'_>) -> InvariantResult {
        for (index, message) in transcript.sent.iter().enumerate() {
            for (position, label) in message.presentation.keyboard.labels().enumerate() {
                let prefix = numbered_caption(position + 1, "");
                if !label.starts_with(&prefix) {
                    return Err(Violation {
                        invariant: self.name(),
                        index,
                        message: format!("label {label:?} does not start with {prefix:?}"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// No send joins more segments than the batch limit.
///
/// Assumes no single segment contains the separator.
pub struct BoundedBatch;

impl Invariant for BoundedBatch {
    fn name(&self) -> &'static str {
        "bounded_batch"
    }

    fn check(&self, transcript: &Transcript<'_>) -> InvariantResult {
        let config = transcript.config;
        for (index, message) in transcript.sent.iter().enumerate() {
            let segments = message.text.split(config.separator.as_str()).count();
            if segments > config.batch_limit {
                return Err(Violation {
                    invariant: self.name(),
                    index,
                    message: format!(
                        "{segments} segments joined, limit is {}",
                        config.batch_limit
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A send never both hides the keyboard and shows one.
pub struct ConsistentPresentation;

impl Invariant for ConsistentPresentation {
    fn name(&self) -> &'static str {
        "consistent_presentation"
    }

    fn check(&self, transcript: &Transcript<'_>) -> InvariantResult {
        let offending = transcript.sent.iter().position(|message| {
            message.presentation.hide_keyboard && !message.presentation.keyboard.is_empty()
        });

        match offending {
            Some(index) => Err(Violation {
                invariant: self.name(),
                index,
                message: "keyboard both hidden and shown".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry with the transcript invariants every session must satisfy.
    ///
    /// Includes:
    /// - [`NonEmptyText`]
    /// - [`NumberedKeyboard`]
    /// - [`BoundedBatch`]
    /// - [`ConsistentPresentation`]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(NonEmptyText);
        registry.add(NumberedKeyboard);
        registry.add(BoundedBatch);
        registry.add(ConsistentPresentation);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn check_all(&self, transcript: &Transcript<'_>) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(transcript).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, transcript: &Transcript<'_>, context: &str) {
        if let Err(violations) = self.check_all(transcript) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use parley_core::{Keyboard, Presentation, UserId};

    use super::*;

    fn message(text: &str, labels: &[&str]) -> OutboundMessage {
        let keyboard = Keyboard {
            rows: labels.iter().map(|label| vec![(*label).to_owned()]).collect(),
        };
        OutboundMessage {
            user: UserId(1),
            text: text.to_owned(),
            presentation: Presentation { keyboard, ..Presentation::default() },
        }
    }

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn well_formed_transcript_passes() {
        let config = EngineConfig::default();
        let sent = [message("Menu:", &["1. A", "2. B"]), message("a\n\nb", &[])];

        assert!(InvariantRegistry::standard().check_all(&Transcript::new(&sent, &config)).is_ok());
    }

    #[test]
    fn misnumbered_keyboard_is_reported() {
        let config = EngineConfig::default();
        let sent = [message("Menu:", &["1. A", "3. B"])];

        let violations = InvariantRegistry::standard()
            .check_all(&Transcript::new(&sent, &config))
            .unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, "numbered_keyboard");
        assert_eq!(violations[0].index, 0);
    }

    #[test]
    fn oversized_batch_is_reported() {
        let config = EngineConfig { batch_limit: 2, ..EngineConfig::default() };
        let sent = [message("ok", &[]), message("a\n\nb\n\nc", &[])];

        let result = BoundedBatch.check(&Transcript::new(&sent, &config));

        assert_eq!(result.map_err(|v| v.index), Err(1));
    }

    #[test]
    fn empty_text_is_reported() {
        let config = EngineConfig::default();
        let sent = [message("", &[])];

        assert!(NonEmptyText.check(&Transcript::new(&sent, &config)).is_err());
    }
}
