//! Transport trait for abstracting chat I/O.
//!
//! The [`Transport`] trait decouples the [`crate::Driver`] from a specific
//! messaging backend. Each frontend implements it to deliver inbound events
//! and accept outbound sends, while the driver owns all conversation logic.

use std::future::Future;

use parley_core::{OutboundMessage, UserId};

/// Inbound event carrying an optional text payload.
pub trait InboundEvent {
    /// Text of the event. `None` for events without text (stickers, photos,
    /// service messages), which the driver treats as an empty message.
    fn text(&self) -> Option<&str>;
}

/// Abstracts a chat backend for the driver.
///
/// # Implementations
///
/// - **Console**: stdin lines in, stdout text out
/// - **Simulation**: scripted event queue with recorded sends
/// - **Bot API**: could wrap any request/response chat service
///
/// # Associated Types
///
/// - [`Event`](Transport::Event): backend-specific inbound event
/// - [`Error`](Transport::Error): backend-specific error type
pub trait Transport {
    /// Backend-specific inbound event.
    type Event: InboundEvent;

    /// Backend-specific error type.
    type Error: std::error::Error + 'static;

    /// Deliver one outbound message.
    ///
    /// Backends with asynchronous output may queue the message here and write
    /// it out in [`Transport::flush`]. The keyboard labels must be rendered exactly as given.
    /// `compact_keyboard` is a rendering hint only.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or cannot deliver the message.
    fn send(&mut self, message: &OutboundMessage) -> Result<(), Self::Error>;

    /// Identify the participant an event came from.
    ///
    /// # Errors
    ///
    /// Returns an error if the event carries no usable sender.
    fn resolve_user(&self, event: &Self::Event) -> Result<UserId, Self::Error>;

    /// The single participant this transport is configured to talk to.
    fn allowed_user(&self) -> UserId;

    /// Wait for the next inbound event.
    ///
    /// Returns `None` once the backend is closed.
    fn next_event(&mut self) -> impl Future<Output = Result<Option<Self::Event>, Self::Error>>;

    /// Write out messages queued by [`Transport::send`].
    ///
    /// The driver calls this after every delivery round. The default does
    /// nothing, for backends whose `send` completes immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if queued output cannot be written.
    fn flush(&mut self) -> impl Future<Output = Result<(), Self::Error>> {
        std::future::ready(Ok(()))
    }
}
