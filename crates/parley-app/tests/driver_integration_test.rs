//! Integration tests for the session driver.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - The user saw exactly the expected sends, in order
//! - The driver restarted only when the conversation stopped
//! - Failures never reach the user and never stall the session

use parley_app::{Driver, Script};
use parley_core::{Dialog, Flow, Halt, MenuOption, Notice, Resumption, ScriptError, UserId};
use parley_harness::{InvariantRegistry, SIM_USER, SimEvent, SimSession, SimTransport};

const MAIN_MENU: &str = "➡ Main menu:";

fn after_menu(notice: &str) -> String {
    format!("{notice}\n\n{MAIN_MENU}")
}

async fn trading(dialog: Dialog) -> Flow<()> {
    loop {
        main_menu(&dialog).await?;
    }
}

#[allow(clippy::panic, reason = "exercises panic containment")]
async fn main_menu(dialog: &Dialog) -> Flow<()> {
    let choice = dialog
        .select_option(
            MAIN_MENU,
            [
                vec![
                    MenuOption::keyed("💵 Balance", "bal"),
                    MenuOption::keyed("📔 Orders", "orders"),
                ],
                vec![
                    MenuOption::keyed("💥 Crash", "crash"),
                    MenuOption::keyed("🧨 Panic", "panic"),
                ],
            ],
            false,
        )
        .await?;

    match choice.as_named() {
        Some("bal") => dialog.notify("💵 Balance: 100 USDT"),
        Some("orders") => place_order(dialog).await?,
        Some("crash") => return Err(Halt::fail("exchange unreachable")),
        Some("panic") => panic!("order book corrupted"),
        _ => dialog.notify("Unknown choice"),
    }
    Ok(())
}

async fn place_order(dialog: &Dialog) -> Flow<()> {
    dialog.notify(Notice::new("How much?").hide_keyboard().flush());
    let positive = |text: &str| text.parse::<u32>().ok().filter(|n| *n > 0);
    let amount = dialog.ask_until_valid(positive, "😡 Send a positive number").await?;

    if dialog.confirm(&format!("Buy {amount} BTC")).await? {
        dialog.notify(format!("✅ Bought {amount} BTC"));
    } else {
        dialog.notify("🚫 Order cancelled");
    }
    Ok(())
}

fn session() -> SimSession<impl Script> {
    SimSession::start(trading).with_invariants(InvariantRegistry::standard())
}

#[test]
fn attach_sends_main_menu() {
    let mut session = session();

    let sent = session.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user, SIM_USER);
    assert_eq!(sent[0].text, MAIN_MENU);
    assert!(!sent[0].presentation.compact_keyboard);

    let labels: Vec<_> = sent[0].presentation.keyboard.labels().collect();
    assert_eq!(labels, ["1. 💵 Balance", "2. 📔 Orders", "3. 💥 Crash", "4. 🧨 Panic"]);
}

#[test]
fn selected_notice_merges_with_next_prompt() {
    let mut session = session();
    session.take_sent();

    assert_eq!(session.say("bal"), Some(Resumption::Suspended));

    let sent = session.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, after_menu("💵 Balance: 100 USDT"));
}

#[test]
fn order_flow_confirms_and_returns_to_menu() {
    let mut session = session();

    session.say("2");
    assert_eq!(session.last_text(), Some("How much?"));
    assert!(session.transcript().last().is_some_and(|m| m.presentation.hide_keyboard));

    session.say("lots");
    assert_eq!(
        session.last_text(),
        Some("😡 Send a positive number\nType /quit or /q if you give up.")
    );

    session.say("3");
    assert_eq!(session.last_text(), Some("🤝 Do you confirm this operation❓\nBuy 3 BTC"));

    session.say("1");
    assert_eq!(session.last_text(), Some(after_menu("✅ Bought 3 BTC").as_str()));
    assert_eq!(session.driver().restarts(), 0);
}

#[test]
fn declined_order_returns_to_menu() {
    let mut session = session();

    session.say("orders");
    session.say("5");
    session.say("2. 🚫 No, cancel please");

    assert_eq!(session.last_text(), Some(after_menu("🚫 Order cancelled").as_str()));
}

#[test]
fn quit_during_ask_restarts_with_single_cancel_notice() {
    let mut session = session();
    session.say("orders");
    session.take_sent();

    assert_eq!(session.say("/q"), Some(Resumption::Stopped));

    let sent = session.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, after_menu("😤 Dialog stopped."));
    assert_eq!(session.driver().restarts(), 1);
    assert!(!session.driver().is_spent());
}

#[test]
fn zero_cancels_confirmation() {
    let mut session = session();
    session.say("orders");
    session.say("1");

    assert_eq!(session.say("0"), Some(Resumption::Stopped));
    assert_eq!(session.last_text(), Some(after_menu("😤 Dialog stopped.").as_str()));
}

#[test]
fn script_failure_is_contained_and_restarts_on_next_event() {
    let mut session = session();
    session.take_sent();

    let outcome = session.say("crash");
    let Some(Resumption::Failed(err)) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(matches!(
        err,
        ScriptError::Script { ref message, .. } if message == "exchange unreachable"
    ));
    let origin = err.origin().map(|location| location.file());
    assert!(origin.is_some_and(|file| file.ends_with("driver_integration_test.rs")));

    assert!(session.take_sent().is_empty());
    assert!(session.driver().is_spent());
    assert_eq!(session.driver().restarts(), 0);

    assert_eq!(session.say("anything"), Some(Resumption::Stopped));
    assert_eq!(session.driver().restarts(), 1);
    assert_eq!(session.last_text(), Some(MAIN_MENU));
}

#[test]
fn script_panic_is_contained() {
    let mut session = session();

    let outcome = session.say("4");
    assert_eq!(
        outcome,
        Some(Resumption::Failed(ScriptError::Panicked("order book corrupted".to_owned())))
    );

    session.say("bal");
    assert_eq!(session.driver().restarts(), 1);
    assert_eq!(session.last_text(), Some(MAIN_MENU));

    session.say("bal");
    assert_eq!(session.last_text(), Some(after_menu("💵 Balance: 100 USDT").as_str()));
}

#[test]
fn non_text_event_counts_as_empty_message() {
    let mut session = session();

    session.inject(&SimEvent::empty(SIM_USER));

    assert!(session.last_text().is_some_and(|text| {
        text.starts_with("😡 Please select a valid option or send a number between 1 and 4.")
    }));
}

#[test]
fn whitespace_around_answers_is_ignored() {
    let mut session = session();

    session.say("  bal \n");

    assert_eq!(session.last_text(), Some(after_menu("💵 Balance: 100 USDT").as_str()));
}

#[tokio::test]
async fn run_flushes_buffered_notices_on_close() {
    async fn note_taker(dialog: Dialog) -> Flow<()> {
        dialog.select_option("Pick:", [MenuOption::new("Note")], true).await?;
        dialog.notify("Send a note");
        let _note: String = dialog.ask_until_valid(|text| Some(text.to_owned()), "").await?;
        Ok(())
    }

    let mut transport = SimTransport::new(UserId(3));
    transport.push_text("1");

    let mut driver = Driver::attach(transport, note_taker);
    driver.run().await.unwrap();

    let texts: Vec<_> = driver.transport().sent().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["Pick:", "Send a note"]);
}
