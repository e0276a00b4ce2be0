//! Line-oriented console transport.
//!
//! Each input line is one inbound event from the configured user. Each send
//! queues the message text followed by one line per keyboard row, with every
//! label in brackets; queued output is written when the driver flushes:
//!
//! ```text
//! ➡ Main menu:
//! [1. 💵 Show balance] [2. 📔 Manage orders]
//! ```

use parley_app::{InboundEvent, Transport};
use parley_core::{OutboundMessage, UserId};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};

use crate::ConsoleError;

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    /// Line without its terminator.
    pub text: String,
}

impl InboundEvent for ConsoleLine {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }
}

/// Console transport over any line reader and writer.
pub struct ConsoleTransport<R, W> {
    lines: Lines<R>,
    output: W,
    pending: String,
    user: UserId,
}

impl ConsoleTransport<BufReader<Stdin>, Stdout> {
    /// Transport reading stdin and printing to stdout.
    pub fn stdio(user: UserId) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), user)
    }
}

impl<R, W> ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Transport reading lines from `input` and writing to `output`.
    pub fn new(input: R, output: W, user: UserId) -> Self {
        Self { lines: input.lines(), output, pending: String::new(), user }
    }

    /// Output written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Rendered output not yet written.
    pub fn pending(&self) -> &str {
        &self.pending
    }
}

impl<R, W> Transport for ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    type Event = ConsoleLine;
    type Error = ConsoleError;

    fn send(&mut self, message: &OutboundMessage) -> Result<(), ConsoleError> {
        self.pending.push_str(&render(message));
        Ok(())
    }

    fn resolve_user(&self, _event: &ConsoleLine) -> Result<UserId, ConsoleError> {
        Ok(self.user)
    }

    fn allowed_user(&self) -> UserId {
        self.user
    }

    async fn next_event(&mut self) -> Result<Option<ConsoleLine>, ConsoleError> {
        let line = self.lines.next_line().await?;
        Ok(line.map(|text| ConsoleLine { text }))
    }

    async fn flush(&mut self) -> Result<(), ConsoleError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let pending = std::mem::take(&mut self.pending);
        self.output.write_all(pending.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

/// Render one message as console text, ending with a newline.
///
/// The keyboard is omitted when it is empty or the message hides it.
pub fn render(message: &OutboundMessage) -> String {
    let mut out = message.text.clone();
    out.push('\n');

    let presentation = &message.presentation;
    if presentation.hide_keyboard {
        return out;
    }

    for row in presentation.keyboard.rows.iter().filter(|row| !row.is_empty()) {
        let buttons: Vec<_> = row.iter().map(|label| format!("[{label}]")).collect();
        out.push_str(&buttons.join(" "));
        out.push('\n');
    }
    out
}
