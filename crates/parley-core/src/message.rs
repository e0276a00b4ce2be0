//! Inbound and outbound message envelopes.
//!
//! These are inert values. The engine produces [`OutboundMessage`]s into its
//! outbox and consumes [`InboundMessage`]s handed over by the driver; it never
//! talks to a transport itself.

use std::fmt;

/// Opaque identity of the remote chat participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Message text with surrounding whitespace removed.
    pub text: String,
    /// Sender of the message.
    pub user: UserId,
}

impl InboundMessage {
    /// Wrap raw transport text. Surrounding whitespace is trimmed.
    pub fn new(raw_text: &str, user: UserId) -> Self {
        Self { text: raw_text.trim().to_owned(), user }
    }
}

/// Reply keyboard: rows of tappable labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    /// Labels, row by row.
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// Keyboard with no buttons.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if there are no buttons at all.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// All labels in row-major order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Rendering attributes attached to one send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Remove any reply keyboard currently shown.
    pub hide_keyboard: bool,
    /// Reply keyboard to show. Empty means none.
    pub keyboard: Keyboard,
    /// Ask the client to shrink the keyboard to fit its buttons.
    pub compact_keyboard: bool,
}

/// One logical outbound turn: exactly one transport send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient.
    pub user: UserId,
    /// Joined text of all buffered segments.
    pub text: String,
    /// Attributes recorded by the most recent notify.
    pub presentation: Presentation,
}
