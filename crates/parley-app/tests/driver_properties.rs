//! Property-based tests for driver recovery.
//!
//! Tests verify that the driver's restart bookkeeping matches the outcomes it
//! reports, whatever mix of answers, quits and transport faults it sees.

use parley_core::{Dialog, Flow, Halt, MenuOption, Resumption};
use parley_harness::{SIM_USER, SimEvent, SimSession};
use proptest::prelude::*;

async fn fragile(dialog: Dialog) -> Flow<()> {
    loop {
        let choice = dialog
            .select_option(
                "Menu:",
                [MenuOption::keyed("Ok", "ok"), MenuOption::keyed("Fail", "fail")],
                true,
            )
            .await?;
        if choice == "fail" {
            return Err(Halt::fail("requested failure"));
        }
    }
}

#[derive(Debug, Clone)]
enum Step {
    Say(&'static str),
    LoseSend,
    LoseSender,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => prop::sample::select(vec!["1", "ok", "2", "fail", "0", "/quit", "nonsense"])
            .prop_map(Step::Say),
        1 => Just(Step::LoseSend),
        1 => Just(Step::LoseSender),
    ]
}

proptest! {
    /// Restarts equal the number of stopped outcomes.
    #[test]
    fn prop_restarts_match_stops(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut session = SimSession::start(fragile);
        let mut stops = 0u64;

        for step in steps {
            let outcome = match step {
                Step::Say(text) => session.inject(&SimEvent::text(SIM_USER, text)),
                Step::LoseSend => {
                    session.driver_mut().transport_mut().fail_next_sends(1);
                    continue;
                },
                Step::LoseSender => {
                    session.driver_mut().transport_mut().fail_next_resolves(1);
                    continue;
                },
            };

            if outcome == Some(Resumption::Stopped) {
                stops += 1;
            }
            prop_assert_eq!(session.driver().restarts(), stops);
        }
    }

    /// A failed conversation is spent until the next event restarts it.
    #[test]
    fn prop_failure_leaves_spent_until_next_event(
        steps in prop::collection::vec(step_strategy(), 0..60),
    ) {
        let mut session = SimSession::start(fragile);

        for step in steps {
            let Step::Say(text) = step else { continue };
            let outcome = session.say(text);
            let failed = matches!(outcome, Some(Resumption::Failed(_)));
            prop_assert_eq!(session.driver().is_spent(), failed);
        }
    }
}
