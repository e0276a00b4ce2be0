//! Deterministic simulation harness for Parley conversations.
//!
//! In-memory implementation of the [`parley_app::Transport`] trait plus a
//! session wrapper, so scripts can be exercised end to end without a chat
//! backend.
//!
//! # Fault Injection
//!
//! [`SimTransport`] can reject the next N sends or fail the next N sender
//! resolutions, exercising the driver's recovery paths.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties every transcript must satisfy.
//! Use [`InvariantRegistry::standard()`] together with
//! [`SimSession::with_invariants`] in property tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_session;
pub mod sim_transport;

pub use invariants::{
    BoundedBatch, ConsistentPresentation, Invariant, InvariantRegistry, InvariantResult,
    NonEmptyText, NumberedKeyboard, Transcript, Violation,
};
pub use sim_session::{SIM_USER, SimSession};
pub use sim_transport::{SimEvent, SimTransport, SimTransportError};
