//! Integration tests for the five-step submission flow.
//!
//! The persisted record must contain the four sent texts verbatim, in send
//! order, whatever their content.

mod common;

use bot_core::dispatch;
use bot_core::domains::submission;
use common::{text_update, TestHarness};

async fn run_submission(harness: &TestHarness, user_id: i64, fields: [&str; 4]) {
    dispatch::handle_update(&harness.kernel, text_update(user_id, "/submit"))
        .await
        .expect("/submit");
    for field in fields {
        dispatch::handle_update(&harness.kernel, text_update(user_id, field))
            .await
            .expect("flow step");
    }
}

#[tokio::test]
async fn five_steps_persist_fields_verbatim_in_send_order() {
    let harness = TestHarness::new();
    run_submission(&harness, 7, ["Cafe A", "Kyiv", "10% discount", "@cafeA"]).await;

    let records = harness.directory.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Cafe A");
    assert_eq!(records[0].city, "Kyiv");
    assert_eq!(records[0].services, "10% discount");
    assert_eq!(records[0].contact, "@cafeA");
    assert_eq!(records[0].submitter_id, 7);
    assert!(!records[0].verified);
    assert!(!records[0].rejected);

    // Prompts arrive in fixed order, then the confirmation.
    let texts: Vec<String> = harness.chat.sent().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            submission::PROMPT_NAME,
            submission::PROMPT_CITY,
            submission::PROMPT_SERVICES,
            submission::PROMPT_CONTACT,
            submission::SUBMITTED_OK,
        ]
    );
}

#[tokio::test]
async fn emoji_multiline_and_empty_inputs_are_stored_verbatim() {
    let harness = TestHarness::new();
    run_submission(&harness, 3, ["☕ Кафе «Мрія»", "", "знижка 50%\nбезкоштовна кава", "  +380 00 000 00 00  "])
        .await;

    let records = harness.directory.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "☕ Кафе «Мрія»");
    assert_eq!(records[0].city, "");
    assert_eq!(records[0].services, "знижка 50%\nбезкоштовна кава");
    assert_eq!(records[0].contact, "  +380 00 000 00 00  ");
}

#[tokio::test]
async fn confirmation_carries_review_buttons_bound_to_the_new_record() {
    let harness = TestHarness::new();
    run_submission(&harness, 7, ["Cafe A", "Kyiv", "10%", "@cafeA"]).await;

    let sent = harness.chat.sent();
    let confirmation = sent.last().expect("confirmation message");
    assert_eq!(confirmation.text, submission::SUBMITTED_OK);
    assert_eq!(confirmation.buttons.len(), 1);
    assert_eq!(confirmation.buttons[0].len(), 2);
    assert_eq!(confirmation.buttons[0][0].payload, "approve:rec1:7");
    assert_eq!(confirmation.buttons[0][1].payload, "reject:rec1:7");
}

#[tokio::test]
async fn store_failure_reports_generic_error_and_returns_to_idle() {
    let harness = TestHarness::with_directory(
        bot_core::kernel::test_dependencies::MockDirectory::new().failing_creates(),
    );
    run_submission(&harness, 7, ["a", "b", "c", "d"]).await;

    let sent = harness.chat.sent();
    let last = sent.last().unwrap();
    assert_eq!(last.text, submission::SUBMITTED_ERR);
    assert!(last.buttons.is_empty());
    assert!(harness.directory.records().is_empty());

    // Session is cleared: the next text gets the idle hint, not a flow step.
    dispatch::handle_update(&harness.kernel, text_update(7, "hello"))
        .await
        .unwrap();
    assert_eq!(harness.chat.sent().last().unwrap().text, dispatch::IDLE_HINT);
}

#[tokio::test]
async fn starting_a_query_mid_submission_abandons_the_draft() {
    let harness = TestHarness::new();
    dispatch::handle_update(&harness.kernel, text_update(7, "/submit"))
        .await
        .unwrap();
    dispatch::handle_update(&harness.kernel, text_update(7, "Cafe A"))
        .await
        .unwrap();

    // Switch flows; the half-filled draft is silently dropped.
    dispatch::handle_update(&harness.kernel, text_update(7, "/request"))
        .await
        .unwrap();
    dispatch::handle_update(&harness.kernel, text_update(7, "need coffee"))
        .await
        .unwrap();

    assert!(harness.directory.records().is_empty());
    assert_eq!(harness.assistant.prompts().len(), 1);
}

#[tokio::test]
async fn concurrent_submissions_from_different_users_do_not_mix() {
    let harness = TestHarness::new();
    dispatch::handle_update(&harness.kernel, text_update(1, "/submit"))
        .await
        .unwrap();
    dispatch::handle_update(&harness.kernel, text_update(2, "/submit"))
        .await
        .unwrap();

    for (user, fields) in [(1, ["A", "Kyiv", "x", "@a"]), (2, ["B", "Lviv", "y", "@b"])] {
        for field in fields {
            dispatch::handle_update(&harness.kernel, text_update(user, field))
                .await
                .unwrap();
        }
    }

    let records = harness.directory.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "A");
    assert_eq!(records[0].submitter_id, 1);
    assert_eq!(records[1].name, "B");
    assert_eq!(records[1].submitter_id, 2);
}
