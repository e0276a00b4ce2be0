//! Simulated transport.
//!
//! `SimTransport` implements [`Transport`] over an in-memory event queue and
//! records every send. Faults can be injected for the next N sends or sender
//! resolutions to exercise the driver's recovery paths.

use std::{cell::Cell, collections::VecDeque, future::Future};

use parley_app::{InboundEvent, Transport};
use parley_core::{OutboundMessage, UserId};
use thiserror::Error;

/// Error type for the simulated transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimTransportError {
    /// Injected send failure.
    #[error("send to user {0} rejected")]
    SendRejected(UserId),

    /// Injected sender resolution failure.
    #[error("cannot resolve sender of event")]
    UnknownSender,
}

/// Inbound event of the simulated transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimEvent {
    /// Sender.
    pub user: UserId,
    /// Text payload, `None` for non-text events.
    pub text: Option<String>,
}

impl SimEvent {
    /// Text event from `user`.
    pub fn text(user: UserId, text: impl Into<String>) -> Self {
        Self { user, text: Some(text.into()) }
    }

    /// Event without text from `user`.
    pub fn empty(user: UserId) -> Self {
        Self { user, text: None }
    }
}

impl InboundEvent for SimEvent {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// In-memory transport for deterministic tests.
#[derive(Debug)]
pub struct SimTransport {
    allowed_user: UserId,
    inbound: VecDeque<SimEvent>,
    sent: Vec<OutboundMessage>,
    failing_sends: usize,
    failing_resolves: Cell<usize>,
}

impl SimTransport {
    /// Transport talking to `allowed_user`.
    pub fn new(allowed_user: UserId) -> Self {
        Self {
            allowed_user,
            inbound: VecDeque::new(),
            sent: Vec::new(),
            failing_sends: 0,
            failing_resolves: Cell::new(0),
        }
    }

    /// Queue an event for [`Transport::next_event`].
    pub fn push_event(&mut self, event: SimEvent) {
        self.inbound.push_back(event);
    }

    /// Queue a text event from the allowed user.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let event = SimEvent::text(self.allowed_user, text);
        self.push_event(event);
    }

    /// Reject the next `count` sends.
    pub fn fail_next_sends(&mut self, count: usize) {
        self.failing_sends = count;
    }

    /// Fail the next `count` sender resolutions.
    pub fn fail_next_resolves(&mut self, count: usize) {
        self.failing_resolves.set(count);
    }

    /// Messages sent so far.
    pub fn sent(&self) -> &[OutboundMessage] {
        &self.sent
    }

    /// Take all recorded messages.
    pub fn take_sent(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.sent)
    }

    /// Events still queued.
    pub fn pending_events(&self) -> usize {
        self.inbound.len()
    }
}

impl Transport for SimTransport {
    type Event = SimEvent;
    type Error = SimTransportError;

    fn send(&mut self, message: &OutboundMessage) -> Result<(), Self::Error> {
        if self.failing_sends > 0 {
            self.failing_sends -= 1;
            tracing::debug!(user = %message.user, "injected send failure");
            return Err(SimTransportError::SendRejected(message.user));
        }

        self.sent.push(message.clone());
        Ok(())
    }

    fn resolve_user(&self, event: &SimEvent) -> Result<UserId, Self::Error> {
        let failing = self.failing_resolves.get();
        if failing > 0 {
            self.failing_resolves.set(failing - 1);
            return Err(SimTransportError::UnknownSender);
        }
        Ok(event.user)
    }

    fn allowed_user(&self) -> UserId {
        self.allowed_user
    }

    fn next_event(&mut self) -> impl Future<Output = Result<Option<SimEvent>, Self::Error>> {
        std::future::ready(Ok(self.inbound.pop_front()))
    }
}
