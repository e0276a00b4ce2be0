//! Console error types.

use thiserror::Error;

/// Errors that can occur on the console transport.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    ///
    /// Usually fatal: the terminal is gone or the pipe was closed. The driver
    /// logs failed sends and keeps going; a failed read ends the session.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (invalid flag combination, etc.).
    ///
    /// Fatal at startup. Fix the arguments and restart.
    #[error("configuration error: {0}")]
    Config(String),
}
