//! Error types for conversation scripts.
//!
//! Two outcomes end a running script early: the stop signal, which is an
//! expected way to finish a conversation, and a failure, which is not.
//! Both travel through [`Halt`] so authors can propagate them with `?`; the
//! continuation turns them into distinct [`crate::Resumption`] variants.

use std::panic::Location;

use thiserror::Error;

/// Result type of every dialog step.
pub type Flow<T> = Result<T, Halt>;

/// Reason a script unwound before reaching its next suspension point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// Conversation ended on purpose (user quit or author stop).
    #[error("dialog stopped")]
    Stop,

    /// Conversation failed.
    #[error(transparent)]
    Failed(#[from] ScriptError),
}

impl Halt {
    /// Failure carrying `message` and the caller's location.
    #[track_caller]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failed(ScriptError::new(message))
    }

    /// Returns true for the stop signal.
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Unhandled failure raised while a script was running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Failure reported by the script itself.
    #[error("{message} (at {location})")]
    Script {
        /// What went wrong.
        message: String,
        /// Where the failure was raised.
        location: &'static Location<'static>,
    },

    /// The script panicked while being polled.
    #[error("script panicked: {0}")]
    Panicked(String),
}

impl ScriptError {
    /// Script failure located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::Script { message: message.into(), location: Location::caller() }
    }

    /// Source location the failure was raised from, if known.
    pub fn origin(&self) -> Option<&'static Location<'static>> {
        match self {
            Self::Script { location, .. } => Some(location),
            Self::Panicked(_) => None,
        }
    }
}
