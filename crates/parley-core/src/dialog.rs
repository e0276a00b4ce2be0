//! Dialog engine.
//!
//! [`Dialog`] is the handle a conversation script talks to. It owns the
//! per-session presentation state (bound user, outbound batch, outbox) and
//! offers the building blocks scripts are made of:
//!
//! - presentation: [`Dialog::notify`], [`Dialog::flush`],
//!   [`Dialog::notify_error`]
//! - suspension: [`Dialog::ask_until_valid`], [`Dialog::select_option`],
//!   [`Dialog::confirm`]
//! - termination: [`Dialog::stop`]
//!
//! The suspension primitives are `async`. Each one awaits the next inbound
//! message, which parks the whole script future until the driver resumes its
//! [`crate::Continuation`] with that message. The engine never performs I/O:
//! flushed messages wait in the outbox until the driver takes them.
//!
//! The handle is cheap to clone; all clones share one session. It is not
//! `Send` and must stay on the thread that drives the continuation.

use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use crate::{
    EngineConfig, Flow, Halt, InboundMessage, MenuEntry, MenuOption, Notice, OptionKey,
    OutboundBatch, OutboundMessage, SelectionTable, UserId,
};

/// Key of the affirmative option in a confirmation prompt.
pub const CONFIRM_YES: &str = "yes";

/// Key of the negative option in a confirmation prompt.
pub const CONFIRM_NO: &str = "no";

#[derive(Debug)]
struct DialogState {
    config: EngineConfig,
    user: Option<UserId>,
    batch: OutboundBatch,
    outbox: Vec<OutboundMessage>,
    inbox: Option<InboundMessage>,
}

impl DialogState {
    fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let Some(user) = self.user else {
            tracing::warn!(segments = self.batch.len(), "cannot flush: no user bound");
            return;
        };

        if let Some(message) = self.batch.take(user, &self.config.separator) {
            tracing::debug!(%user, bytes = message.text.len(), "flushed outbound batch");
            self.outbox.push(message);
        }
    }
}

/// Per-session dialog engine handle.
#[derive(Debug, Clone)]
pub struct Dialog {
    state: Rc<RefCell<DialogState>>,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Dialog {
    /// Create an engine with no bound user and empty buffers.
    pub fn new(config: EngineConfig) -> Self {
        let state = DialogState {
            config,
            user: None,
            batch: OutboundBatch::new(),
            outbox: Vec::new(),
            inbox: None,
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    /// Bind the user all subsequent notices are addressed to.
    pub fn bind(&self, user: UserId) {
        self.state.borrow_mut().user = Some(user);
    }

    /// Currently bound user.
    pub fn user(&self) -> Option<UserId> {
        self.state.borrow().user
    }

    /// Engine configuration.
    pub fn config(&self) -> EngineConfig {
        self.state.borrow().config.clone()
    }

    /// Buffer a text segment.
    ///
    /// Records the notice's presentation (replacing any earlier one) and
    /// flushes once the batch reaches its limit or the notice asks for it.
    /// Without a bound user, or with empty text, this logs a warning and
    /// does nothing.
    pub fn notify(&self, notice: impl Into<Notice>) {
        let notice = notice.into();
        let mut state = self.state.borrow_mut();

        if state.user.is_none() || notice.text.is_empty() {
            tracing::warn!(
                user_bound = state.user.is_some(),
                "cannot notify: bind a user and send non-empty text"
            );
            return;
        }

        let buffered = state.batch.push(notice.text, notice.presentation);
        if notice.flush || buffered >= state.config.batch_limit {
            state.flush();
        }
    }

    /// Send everything buffered as one message. No-op if nothing is buffered.
    pub fn flush(&self) {
        self.state.borrow_mut().flush();
    }

    /// Send `text` right away, followed by the escape hint.
    pub fn notify_error(&self, text: &str) {
        let hint = self.state.borrow().config.escape_hint.clone();
        self.notify(Notice::new(format!("{text}\n{hint}")).flush());
    }

    /// Drain flushed messages, oldest first.
    pub fn take_outgoing(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.state.borrow_mut().outbox)
    }

    /// Segments buffered but not yet flushed.
    pub fn pending_segments(&self) -> usize {
        self.state.borrow().batch.len()
    }

    /// End the conversation. The driver restarts it from the root.
    ///
    /// ```
    /// use parley_core::{Dialog, Flow};
    ///
    /// fn leave(dialog: &Dialog) -> Flow<()> {
    ///     dialog.stop()
    /// }
    ///
    /// assert!(leave(&Dialog::default()).is_err());
    /// ```
    pub fn stop<T>(&self) -> Flow<T> {
        Err(Halt::Stop)
    }

    /// Ask for free text until `validator` accepts it.
    ///
    /// `validator` returns `Some` to accept. On `None`, `failure_text` (when
    /// non-empty) is sent as an error notice and the prompt waits again,
    /// without limit. A quit literal sends the cancellation notice and stops
    /// the conversation.
    pub async fn ask_until_valid<T, F>(&self, mut validator: F, failure_text: &str) -> Flow<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            let message = self.next_message().await;

            if self.state.borrow().config.is_quit(&message.text) {
                return self.cancel();
            }

            if let Some(value) = validator(&message.text) {
                return Ok(value);
            }

            if !failure_text.is_empty() {
                self.notify_error(failure_text);
            }
        }
    }

    /// Present numbered options and wait for a valid choice.
    ///
    /// Entries are flattened row-major and numbered from 1. An answer may be
    /// the number, the bare caption, the numbered caption or the option's
    /// key. Anything else re-prompts with the valid range. Selection quit
    /// literals cancel the conversation.
    ///
    /// An empty menu is an authoring error: the conversation stops at once.
    pub async fn select_option<E>(
        &self,
        prompt: impl Into<String>,
        entries: impl IntoIterator<Item = E>,
        compact_keyboard: bool,
    ) -> Flow<OptionKey>
    where
        E: Into<MenuEntry>,
    {
        let prompt = prompt.into();
        let entries: Vec<MenuEntry> = entries.into_iter().map(Into::into).collect();
        let (table, keyboard) = SelectionTable::build(&entries);

        if table.is_empty() {
            tracing::warn!(%prompt, "selection prompt has no options, stopping dialog");
            return Err(Halt::Stop);
        }

        let mut text = prompt.clone();
        loop {
            self.notify(Notice::new(text).keyboard(keyboard.clone()).compact(compact_keyboard));
            self.flush();

            let answer = self.next_message().await;

            if self.state.borrow().config.is_selection_quit(&answer.text) {
                return self.cancel();
            }

            if let Some(key) = table.resolve(&answer.text) {
                return Ok(key.clone());
            }

            tracing::debug!(answer = %answer.text, "unrecognized selection");
            text = self.state.borrow().config.invalid_selection(table.option_count(), &prompt);
        }
    }

    /// Yes/no confirmation with the configured default labels.
    pub async fn confirm(&self, prompt: &str) -> Flow<bool> {
        let config = self.config();
        self.confirm_with(prompt, &config.confirm_yes, &config.confirm_no).await
    }

    /// Yes/no confirmation with custom labels.
    ///
    /// Inherits cancellation from [`Dialog::select_option`].
    pub async fn confirm_with(&self, prompt: &str, yes_label: &str, no_label: &str) -> Flow<bool> {
        let prefix = self.state.borrow().config.confirm_prefix.clone();
        let options = [
            MenuOption::keyed(format!("✅ {yes_label}"), CONFIRM_YES),
            MenuOption::keyed(format!("🚫 {no_label}"), CONFIRM_NO),
        ];

        let key = self.select_option(format!("{prefix}\n{prompt}"), options, true).await?;
        Ok(key == CONFIRM_YES)
    }

    fn cancel<T>(&self) -> Flow<T> {
        let notice = self.state.borrow().config.cancel_notice.clone();
        self.notify(notice);
        Err(Halt::Stop)
    }

    fn next_message(&self) -> NextMessage {
        NextMessage { state: Rc::clone(&self.state), yielded: false }
    }

    /// Hand a message to the script's pending suspension point.
    pub(crate) fn deliver(&self, message: InboundMessage) {
        self.state.borrow_mut().inbox = Some(message);
    }

    /// Drop a delivered message nobody was waiting for.
    pub(crate) fn discard_undelivered(&self) {
        if let Some(message) = self.state.borrow_mut().inbox.take() {
            tracing::debug!(text = %message.text, "discarded message with no pending prompt");
        }
    }
}

/// Suspension point: yields once, then completes with the delivered message.
///
/// The unconditional first yield matches a generator `yield`: a prompt never
/// consumes a message that arrived before it started waiting.
struct NextMessage {
    state: Rc<RefCell<DialogState>>,
    yielded: bool,
}

impl Future for NextMessage {
    type Output = InboundMessage;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        if !self.yielded {
            self.yielded = true;
            return Poll::Pending;
        }

        match self.state.borrow_mut().inbox.take() {
            Some(message) => Poll::Ready(message),
            None => Poll::Pending,
        }
    }
}
