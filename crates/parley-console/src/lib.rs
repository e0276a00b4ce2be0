//! Console frontend for Parley.
//!
//! Wires the [`parley_app::Driver`] to stdin/stdout so a menu script can be
//! tried from a terminal, one line per message.
//!
//! # Components
//!
//! - [`ConsoleTransport`]: line-oriented [`parley_app::Transport`]
//! - [`TradingMenu`]: demo trading-bot menu script
//! - [`render`]: plain-text rendering of an outbound message

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod console;
mod error;
mod menu;

pub use console::{ConsoleLine, ConsoleTransport, render};
pub use error::ConsoleError;
pub use menu::{MAIN_MENU, TradingMenu};
