//! Conversation script contract.
//!
//! A script is the author's menu tree. The driver only needs its root: a
//! fresh root future is created whenever a conversation starts or restarts.
//!
//! Roots are expected to loop forever, re-entering the main menu after each
//! sub-dialog, so that a conversation only ends through the stop signal.
//!
//! ```
//! use parley_app::Script;
//! use parley_core::{Dialog, Flow, MenuOption};
//!
//! async fn root(dialog: Dialog) -> Flow<()> {
//!     loop {
//!         let choice = dialog
//!             .select_option("Main menu:", [MenuOption::keyed("Ping", "ping")], true)
//!             .await?;
//!         if choice == "ping" {
//!             dialog.notify("pong");
//!         }
//!     }
//! }
//!
//! fn assert_script(_: &impl Script) {}
//! assert_script(&root);
//! ```

use std::future::Future;

use futures::FutureExt;
use parley_core::{Dialog, Flow, ScriptFuture};

/// Author-supplied conversation.
pub trait Script {
    /// Build the root future of a new conversation bound to `dialog`.
    fn root(&self, dialog: Dialog) -> ScriptFuture;
}

impl<F, Fut> Script for F
where
    F: Fn(Dialog) -> Fut,
    Fut: Future<Output = Flow<()>> + 'static,
{
    fn root(&self, dialog: Dialog) -> ScriptFuture {
        self(dialog).boxed_local()
    }
}
