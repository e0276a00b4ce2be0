//! Outbound message batching.
//!
//! Consecutive notices are buffered and joined into one send so the user sees
//! few, larger messages instead of a burst of fragments.

use crate::{Keyboard, OutboundMessage, Presentation, UserId};

/// One `notify` request.
///
/// Defaults: keyboard kept, no options, no forced flush, full-size keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    /// Text segment to buffer.
    pub text: String,
    /// Attributes for the eventual send.
    pub presentation: Presentation,
    /// Flush right after buffering this segment.
    pub flush: bool,
}

impl Notice {
    /// Plain notice.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Remove the reply keyboard.
    #[must_use]
    pub fn hide_keyboard(mut self) -> Self {
        self.presentation.hide_keyboard = true;
        self
    }

    /// Attach a reply keyboard.
    #[must_use]
    pub fn keyboard(mut self, keyboard: Keyboard) -> Self {
        self.presentation.keyboard = keyboard;
        self
    }

    /// Shrink the keyboard to fit its buttons.
    #[must_use]
    pub fn compact(mut self, compact_keyboard: bool) -> Self {
        self.presentation.compact_keyboard = compact_keyboard;
        self
    }

    /// Send immediately.
    #[must_use]
    pub fn flush(mut self) -> Self {
        self.flush = true;
        self
    }
}

impl From<&str> for Notice {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Notice {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Pending text segments plus the last requested presentation.
///
/// Presentation attributes are not merged: only the most recent ones reach
/// the send.
#[derive(Debug, Clone, Default)]
pub struct OutboundBatch {
    segments: Vec<String>,
    presentation: Presentation,
}

impl OutboundBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a segment and record its presentation.
    ///
    /// Returns the number of buffered segments.
    pub fn push(&mut self, text: String, presentation: Presentation) -> usize {
        self.presentation = presentation;
        self.segments.push(text);
        self.segments.len()
    }

    /// Buffered segment count.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join buffered segments into one message for `user` and clear the
    /// buffer. `None` if nothing is buffered.
    pub fn take(&mut self, user: UserId, separator: &str) -> Option<OutboundMessage> {
        if self.segments.is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.segments).join(separator);
        Some(OutboundMessage { user, text, presentation: self.presentation.clone() })
    }
}
