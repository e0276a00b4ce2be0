//! Simulated chat session.
//!
//! `SimSession` wraps a [`Driver`] over a [`SimTransport`] so tests can type
//! messages one at a time and inspect what the user would have seen, with
//! optional invariant checks after every step.

use parley_app::{Driver, Script};
use parley_core::{EngineConfig, OutboundMessage, Resumption, UserId};

use crate::{
    invariants::{InvariantRegistry, Transcript},
    sim_transport::{SimEvent, SimTransport},
};

/// Default participant of a simulated session.
pub const SIM_USER: UserId = UserId(42);

/// One conversation driven by hand.
pub struct SimSession<S: Script> {
    driver: Driver<SimTransport, S>,
    config: EngineConfig,
    transcript: Vec<OutboundMessage>,
    unread: Vec<OutboundMessage>,
    invariants: Option<InvariantRegistry>,
}

impl<S: Script> SimSession<S> {
    /// Attach `script` for [`SIM_USER`] with the default config.
    pub fn start(script: S) -> Self {
        Self::with_config(script, EngineConfig::default())
    }

    /// Attach `script` for [`SIM_USER`].
    pub fn with_config(script: S, config: EngineConfig) -> Self {
        let driver =
            Driver::attach_with_config(SimTransport::new(SIM_USER), script, config.clone());
        let mut session = Self {
            driver,
            config,
            transcript: Vec::new(),
            unread: Vec::new(),
            invariants: None,
        };
        session.record();
        session
    }

    /// Enable invariant checking after every step.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self.check_invariants("after attach");
        self
    }

    /// Type `text` as the session's user.
    pub fn say(&mut self, text: &str) -> Option<Resumption> {
        self.inject(&SimEvent::text(SIM_USER, text))
    }

    /// Feed an arbitrary event to the driver.
    pub fn inject(&mut self, event: &SimEvent) -> Option<Resumption> {
        let outcome = self.driver.on_inbound(event);
        self.record();
        self.check_invariants(&format!("after {event:?}"));
        outcome
    }

    /// Take messages sent since the last call.
    pub fn take_sent(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.unread)
    }

    /// Text of the most recent send.
    pub fn last_text(&self) -> Option<&str> {
        self.transcript.last().map(|message| message.text.as_str())
    }

    /// Every message sent since the session started.
    pub fn transcript(&self) -> &[OutboundMessage] {
        &self.transcript
    }

    /// Underlying driver.
    pub fn driver(&self) -> &Driver<SimTransport, S> {
        &self.driver
    }

    /// Underlying driver, mutably.
    pub fn driver_mut(&mut self) -> &mut Driver<SimTransport, S> {
        &mut self.driver
    }

    fn record(&mut self) {
        let sent = self.driver.transport_mut().take_sent();
        self.transcript.extend_from_slice(&sent);
        self.unread.extend(sent);
    }

    fn check_invariants(&self, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&Transcript::new(&self.transcript, &self.config), context);
        }
    }
}
