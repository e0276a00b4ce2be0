//! Resumable conversation.
//!
//! A [`Continuation`] wraps the script's root future. It is never scheduled
//! by an executor: the driver polls it by hand, once to prime it and once per
//! inbound message. Between polls the future sits parked at a suspension
//! point inside one of the [`Dialog`] prompts.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    task::{Context, Poll},
};

use futures::{FutureExt, future::LocalBoxFuture, task::noop_waker_ref};

use crate::{Dialog, Flow, Halt, InboundMessage, ScriptError};

/// Root future of a conversation script.
pub type ScriptFuture = LocalBoxFuture<'static, Flow<()>>;

/// Outcome of priming or resuming a continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resumption {
    /// Parked at a prompt, waiting for the next message.
    Suspended,
    /// Conversation is over. Start a new one from the root.
    Stopped,
    /// Script failed.
    Failed(ScriptError),
}

/// Suspended execution state of one conversation.
pub struct Continuation {
    dialog: Dialog,
    future: Option<ScriptFuture>,
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation").field("spent", &self.is_spent()).finish_non_exhaustive()
    }
}

impl Continuation {
    /// Wrap a root future. Nothing runs until [`Continuation::prime`].
    pub fn new(dialog: Dialog, future: ScriptFuture) -> Self {
        Self { dialog, future: Some(future) }
    }

    /// Run the script up to its first suspension point.
    pub fn prime(&mut self) -> Resumption {
        self.poll()
    }

    /// Deliver `message` to the pending prompt and run to the next
    /// suspension point.
    ///
    /// A spent continuation reports [`Resumption::Stopped`] without running
    /// anything.
    pub fn resume(&mut self, message: InboundMessage) -> Resumption {
        if self.is_spent() {
            return Resumption::Stopped;
        }

        self.dialog.deliver(message);
        let outcome = self.poll();
        self.dialog.discard_undelivered();
        outcome
    }

    /// True once the script future has completed, in any way.
    pub fn is_spent(&self) -> bool {
        self.future.is_none()
    }

    fn poll(&mut self) -> Resumption {
        let Some(future) = self.future.as_mut() else {
            return Resumption::Stopped;
        };

        let mut cx = Context::from_waker(noop_waker_ref());
        let polled = panic::catch_unwind(AssertUnwindSafe(|| future.poll_unpin(&mut cx)));

        let outcome = match polled {
            Ok(Poll::Pending) => return Resumption::Suspended,
            Ok(Poll::Ready(outcome)) => outcome,
            Err(payload) => Err(Halt::Failed(ScriptError::Panicked(panic_message(&*payload)))),
        };

        self.future = None;
        match outcome {
            Ok(()) | Err(Halt::Stop) => Resumption::Stopped,
            Err(Halt::Failed(err)) => Resumption::Failed(err),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
