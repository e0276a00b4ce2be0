//! Driver recovery under injected transport faults.

use parley_app::{Driver, Transport};
use parley_core::{Dialog, Flow, MenuOption, OutboundMessage, Presentation, Resumption, UserId};
use parley_harness::{SIM_USER, SimEvent, SimSession, SimTransport, SimTransportError};

async fn counter(dialog: Dialog) -> Flow<()> {
    let mut count = 0u32;
    loop {
        let choice = dialog
            .select_option(format!("Count: {count}"), [MenuOption::keyed("Add", "add")], true)
            .await?;
        if choice == "add" {
            count += 1;
        }
    }
}

#[test]
fn send_faults_expire_after_count() {
    let mut transport = SimTransport::new(SIM_USER);
    transport.fail_next_sends(2);

    let message = OutboundMessage {
        user: SIM_USER,
        text: "hi".to_owned(),
        presentation: Presentation::default(),
    };

    assert_eq!(transport.send(&message), Err(SimTransportError::SendRejected(SIM_USER)));
    assert_eq!(transport.send(&message), Err(SimTransportError::SendRejected(SIM_USER)));
    assert_eq!(transport.send(&message), Ok(()));
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn resolve_faults_expire_after_count() {
    let mut transport = SimTransport::new(SIM_USER);
    transport.fail_next_resolves(1);
    let event = SimEvent::text(UserId(7), "x");

    assert_eq!(transport.resolve_user(&event), Err(SimTransportError::UnknownSender));
    assert_eq!(transport.resolve_user(&event), Ok(UserId(7)));
}

#[test]
fn lost_send_does_not_disturb_conversation() {
    let mut session = SimSession::start(counter);
    session.take_sent();

    session.driver_mut().transport_mut().fail_next_sends(1);
    assert_eq!(session.say("1"), Some(Resumption::Suspended));
    assert!(session.take_sent().is_empty());

    assert_eq!(session.say("add"), Some(Resumption::Suspended));
    assert_eq!(session.last_text(), Some("Count: 2"));
}

#[test]
fn unresolved_sender_drops_event() {
    let mut session = SimSession::start(counter);
    session.take_sent();

    session.driver_mut().transport_mut().fail_next_resolves(1);
    assert_eq!(session.say("1"), None);
    assert!(session.take_sent().is_empty());

    assert_eq!(session.say("1"), Some(Resumption::Suspended));
    assert_eq!(session.last_text(), Some("Count: 1"));
    assert_eq!(session.driver().restarts(), 0);
}

#[tokio::test]
async fn run_drains_queue_in_order() {
    let mut transport = SimTransport::new(SIM_USER);
    for text in ["1", "add", "/quit", "1"] {
        transport.push_text(text);
    }

    let mut driver = Driver::attach(transport, counter);
    driver.run().await.unwrap();

    let texts: Vec<_> = driver.transport().sent().iter().map(|m| m.text.clone()).collect();
    assert_eq!(
        texts,
        ["Count: 0", "Count: 1", "Count: 2", "😤 Dialog stopped.\n\nCount: 0", "Count: 1"]
    );
    assert_eq!(driver.restarts(), 1);
    assert_eq!(driver.transport().pending_events(), 0);
}

#[tokio::test]
async fn events_from_other_users_rebind_dialog() {
    let mut transport = SimTransport::new(SIM_USER);
    transport.push_event(SimEvent::text(UserId(7), "1"));

    let mut driver = Driver::attach(transport, counter);
    driver.run().await.unwrap();

    assert_eq!(driver.user(), Some(UserId(7)));
    let last = driver.transport().sent().last().map(|m| m.user);
    assert_eq!(last, Some(UserId(7)));
}
