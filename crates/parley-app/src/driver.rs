//! Session driver.
//!
//! The [`Driver`] binds one [`Dialog`] to one [`Transport`] session. It feeds
//! every inbound event into the suspended conversation, restarts the
//! conversation from the script root when it stops, and contains failures
//! at its boundary so the transport loop keeps running.
//!
//! # Recovery
//!
//! - **Stopped**: logged at info, a fresh root continuation is created and
//!   primed immediately, without waiting for another event.
//! - **Failed**: logged at error with the failure's origin; the continuation
//!   is left exactly as the resumption left it and nothing is sent to the
//!   user on its behalf.
//! - **Transport errors**: logged at error; the continuation is untouched.

use parley_core::{
    Continuation, Dialog, EngineConfig, InboundMessage, Resumption, ScriptError, UserId,
};

use crate::{InboundEvent, Script, Transport};

/// Drives one conversation over one transport session.
///
/// # Type Parameters
///
/// - `T`: chat backend
/// - `S`: conversation script
pub struct Driver<T, S>
where
    T: Transport,
    S: Script,
{
    transport: T,
    script: S,
    dialog: Dialog,
    continuation: Continuation,
    restarts: u64,
}

impl<T, S> Driver<T, S>
where
    T: Transport,
    S: Script,
{
    /// Attach a script to a transport with the default engine config.
    pub fn attach(transport: T, script: S) -> Self {
        Self::attach_with_config(transport, script, EngineConfig::default())
    }

    /// Attach a script to a transport.
    ///
    /// Binds the transport's allowed user, creates the root conversation and
    /// primes it, sending whatever it says before its first prompt.
    pub fn attach_with_config(transport: T, script: S, config: EngineConfig) -> Self {
        let dialog = Dialog::new(config);
        dialog.bind(transport.allowed_user());
        let continuation = Continuation::new(dialog.clone(), script.root(dialog.clone()));

        let mut driver = Self { transport, script, dialog, continuation, restarts: 0 };
        driver.prime();
        driver.deliver();
        driver
    }

    /// Rebind the user subsequent notices are addressed to.
    ///
    /// The running conversation is not affected.
    pub fn bind(&mut self, user: UserId) {
        self.dialog.bind(user);
    }

    /// Handle one inbound event.
    ///
    /// Returns the resumption outcome, or `None` if the event was dropped
    /// because its sender could not be resolved.
    pub fn on_inbound(&mut self, event: &T::Event) -> Option<Resumption> {
        let user = match self.transport.resolve_user(event) {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(error = %err, "dropping inbound event: cannot resolve sender");
                return None;
            },
        };
        self.bind(user);

        let message = InboundMessage::new(event.text().unwrap_or_default(), user);
        tracing::debug!(%user, text = %message.text, "resuming conversation");

        let outcome = self.continuation.resume(message);
        match &outcome {
            Resumption::Suspended => {},
            Resumption::Stopped => {
                tracing::info!(%user, "conversation stopped, restarting from root");
                self.restart();
            },
            Resumption::Failed(err) => {
                tracing::error!(
                    %user,
                    error = %err,
                    origin = %origin(err),
                    "conversation failed, keeping current continuation"
                );
            },
        }

        self.deliver();
        Some(outcome)
    }

    /// Pump events from the transport until it closes.
    ///
    /// Events are handled strictly one at a time, and the transport's queued
    /// output is flushed after each. Notices still buffered when the transport
    /// closes are delivered before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to produce the next event.
    pub async fn run(&mut self) -> Result<(), T::Error> {
        self.flush_transport().await;
        while let Some(event) = self.transport.next_event().await? {
            self.on_inbound(&event);
            self.flush_transport().await;
        }

        tracing::info!("transport closed");
        self.dialog.flush();
        self.deliver();
        self.flush_transport().await;
        Ok(())
    }

    /// Discard the current conversation and start a new one from the root.
    pub fn restart(&mut self) {
        let root = self.script.root(self.dialog.clone());
        self.continuation = Continuation::new(self.dialog.clone(), root);
        self.restarts += 1;
        self.prime();
    }

    /// Dialog engine shared with the running script.
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Currently bound user.
    pub fn user(&self) -> Option<UserId> {
        self.dialog.user()
    }

    /// Number of restarts since attaching.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// True if the current conversation has completed and the next event
    /// will restart it.
    pub fn is_spent(&self) -> bool {
        self.continuation.is_spent()
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn prime(&mut self) {
        match self.continuation.prime() {
            Resumption::Suspended => tracing::debug!("conversation primed"),
            Resumption::Stopped => {
                tracing::warn!("conversation ended before its first prompt");
            },
            Resumption::Failed(err) => {
                tracing::error!(
                    error = %err,
                    origin = %origin(&err),
                    "conversation failed to start"
                );
            },
        }
    }

    async fn flush_transport(&mut self) {
        if let Err(err) = self.transport.flush().await {
            tracing::error!(error = %err, "failed to flush transport output");
        }
    }

    /// Send everything the dialog has flushed, oldest first.
    fn deliver(&mut self) {
        for message in self.dialog.take_outgoing() {
            if let Err(err) = self.transport.send(&message) {
                tracing::error!(user = %message.user, error = %err, "failed to send message");
            }
        }
    }
}

fn origin(err: &ScriptError) -> String {
    err.origin().map_or_else(|| "unknown".to_owned(), ToString::to_string)
}
