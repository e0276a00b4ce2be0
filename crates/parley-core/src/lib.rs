//! Sans-IO dialog engine for menu-driven chat conversations.
//!
//! A conversation is written as ordinary sequential `async` code against a
//! [`Dialog`] handle: ask, validate, branch. The transport only ever delivers
//! one inbound message per event, so the engine keeps the script parked
//! inside a [`Continuation`] and advances it one message at a time.
//!
//! # Components
//!
//! - [`MenuOption`], [`MenuEntry`], [`OptionKey`]: selectable choices
//! - [`InboundMessage`], [`OutboundMessage`], [`Keyboard`]: message envelopes
//! - [`OutboundBatch`], [`Notice`]: buffering of outbound text
//! - [`SelectionTable`]: literal-to-key lookup for one selection prompt
//! - [`Dialog`]: presentation and suspension primitives
//! - [`Continuation`], [`Resumption`]: prime/resume of a script
//!
//! The engine performs no I/O. Flushed messages collect in the dialog's
//! outbox until the driver takes them with [`Dialog::take_outgoing`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod config;
mod continuation;
mod dialog;
mod error;
mod message;
mod option;
mod selection;

pub use batch::{Notice, OutboundBatch};
pub use config::EngineConfig;
pub use continuation::{Continuation, Resumption, ScriptFuture};
pub use dialog::{CONFIRM_NO, CONFIRM_YES, Dialog};
pub use error::{Flow, Halt, ScriptError};
pub use message::{InboundMessage, Keyboard, OutboundMessage, Presentation, UserId};
pub use option::{MenuEntry, MenuOption, OptionKey};
pub use selection::{SelectionTable, numbered_caption};
