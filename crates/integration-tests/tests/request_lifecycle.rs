//! Integration tests for the full request lifecycle.
//!
//! Drives the workflow the way Slack would: slash command, form submission,
//! Edit click, edit submission and deletion, all against an in-memory
//! workspace.

#![allow(clippy::unwrap_used)]

use editable_request_app::slack::SlashCommand;
use editable_request_app::workflow::{self, StepError, WorkflowEvent};
use editable_request_core::{
    ChannelId, MessageTs, REQUEST_EVENT_TYPE, Request, StepOutcome, TriggerId, UserId,
};
use editable_request_integration_tests::{
    FakeSlack, OpenedModal, delete_click, edit_click, event_from, modal_submission,
    prefilled_description,
};

const SUBMITTER: &str = "U1";
const OTHER_USER: &str = "U2";

fn channel() -> ChannelId {
    ChannelId::new("C1")
}

/// Run the trigger and submit the form, returning the posted message's ts.
async fn submit(slack: &FakeSlack, description: &str) -> MessageTs {
    let command = SlashCommand {
        command: "/request".to_string(),
        channel_id: channel(),
        user_id: UserId::new(SUBMITTER),
        trigger_id: TriggerId::new("trigger-command"),
    };
    workflow::open_request_form(slack, &command)
        .await
        .expect("form opens");

    let form = slack.last_opened().expect("form modal");
    let outcome = workflow::dispatch(slack, event_from(&modal_submission(&form, SUBMITTER, description)))
        .await
        .expect("request posts");
    assert_eq!(outcome, StepOutcome::Continue);

    slack.latest_ts(&channel()).expect("request message")
}

async fn open_edit_modal(slack: &FakeSlack, user: &str, ts: &MessageTs) -> OpenedModal {
    let outcome = workflow::dispatch(slack, event_from(&edit_click(user, &channel(), ts)))
        .await
        .expect("edit click handled");
    assert_eq!(outcome, StepOutcome::Continue);
    slack.last_opened().expect("modal opened")
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_form_modal_targets_invoking_channel() {
    let slack = FakeSlack::new();
    let command = SlashCommand {
        command: "/request".to_string(),
        channel_id: channel(),
        user_id: UserId::new(SUBMITTER),
        trigger_id: TriggerId::new("trigger-command"),
    };

    workflow::open_request_form(&slack, &command).await.unwrap();

    let form = slack.last_opened().unwrap();
    assert_eq!(form.trigger_id, TriggerId::new("trigger-command"));
    assert_eq!(form.view.callback_id, "submit-editable-request");
    assert_eq!(form.view.private_metadata.as_deref(), Some("C1"));
}

#[tokio::test]
async fn test_submission_posts_message_with_metadata() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;

    assert!(slack.has_joined(&channel()));
    let message = slack.message(&channel(), &ts).unwrap();
    assert_eq!(message.text, "*Description of the issue:*\nprinter broken\n\n");

    let metadata = message.metadata.unwrap();
    assert_eq!(metadata.event_type, REQUEST_EVENT_TYPE);
    assert_eq!(
        metadata.request(),
        Some(Request::new("printer broken", UserId::new(SUBMITTER)))
    );
}

// =============================================================================
// Editing
// =============================================================================

#[tokio::test]
async fn test_submitter_gets_prefilled_edit_modal() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;

    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;

    assert_eq!(modal.view.callback_id, "edit-message");
    assert_eq!(modal.view.title.text, "Edit/delete message");
    assert_eq!(prefilled_description(&modal.view).as_deref(), Some("printer broken"));
}

#[tokio::test]
async fn test_edit_rewrites_message_in_place() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;

    let outcome = workflow::dispatch(&slack, event_from(&modal_submission(&modal, SUBMITTER, "printer fixed")))
        .await
        .unwrap();

    assert_eq!(outcome, StepOutcome::Continue);
    assert_eq!(slack.message_count(), 1);
    let message = slack.message(&channel(), &ts).unwrap();
    assert_eq!(message.text, "*Description of the issue:*\nprinter fixed\n\n");
    assert_eq!(
        message.metadata.unwrap().request(),
        Some(Request::new("printer fixed", UserId::new(SUBMITTER)))
    );
}

#[tokio::test]
async fn test_edit_preserves_submitter_whoever_submits() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;

    // A submission event carrying another user ID still keeps the session's submitter.
    workflow::dispatch(&slack, event_from(&modal_submission(&modal, OTHER_USER, "hijacked")))
        .await
        .unwrap();

    let request = slack
        .message(&channel(), &ts)
        .and_then(|m| m.metadata)
        .and_then(|m| m.request())
        .unwrap();
    assert_eq!(request.submitter_id, UserId::new(SUBMITTER));
}

#[tokio::test]
async fn test_edit_with_corrupted_session_fails() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;
    let mut modal = open_edit_modal(&slack, SUBMITTER, &ts).await;
    modal.view.private_metadata = Some("{not json".to_string());

    let result =
        workflow::dispatch(&slack, event_from(&modal_submission(&modal, SUBMITTER, "printer fixed"))).await;

    assert!(matches!(result, Err(StepError::InvalidSession(_))));
    let message = slack.message(&channel(), &ts).unwrap();
    assert_eq!(message.text, "*Description of the issue:*\nprinter broken\n\n");
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_removes_message_and_confirms() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;

    let outcome = workflow::dispatch(&slack, event_from(&delete_click(&modal, SUBMITTER, None)))
        .await
        .unwrap();

    assert_eq!(outcome, StepOutcome::Complete);
    assert!(slack.message(&channel(), &ts).is_none());
    assert_eq!(slack.deleted(), vec![(channel(), ts)]);

    let updates = slack.view_updates();
    let (view_id, view) = updates.first().unwrap();
    assert_eq!(view_id, &modal.view_id);
    assert_eq!(view.callback_id, "message-deleted");
    assert_eq!(view.title.text, "Message deleted");
}

#[tokio::test]
async fn test_delete_ignores_corrupted_private_metadata() {
    let slack = FakeSlack::new();
    let ts = submit(&slack, "printer broken").await;
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;

    let outcome = workflow::dispatch(
        &slack,
        event_from(&delete_click(&modal, SUBMITTER, Some("%%garbage%%"))),
    )
    .await
    .unwrap();

    assert_eq!(outcome, StepOutcome::Complete);
    assert!(slack.message(&channel(), &ts).is_none());
}

#[tokio::test]
async fn test_delete_targets_only_the_clicked_message() {
    let slack = FakeSlack::new();
    let first = submit(&slack, "printer broken").await;
    let second = submit(&slack, "projector broken").await;
    let modal = open_edit_modal(&slack, SUBMITTER, &first).await;

    workflow::dispatch(&slack, event_from(&delete_click(&modal, SUBMITTER, None)))
        .await
        .unwrap();

    assert!(slack.message(&channel(), &first).is_none());
    assert!(slack.message(&channel(), &second).is_some());
}

// =============================================================================
// Full Scenario
// =============================================================================

#[tokio::test]
async fn test_submit_edit_deny_delete_scenario() {
    let slack = FakeSlack::new();

    // U1 submits
    let ts = submit(&slack, "printer broken").await;

    // U1 edits
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;
    workflow::dispatch(&slack, event_from(&modal_submission(&modal, SUBMITTER, "printer fixed")))
        .await
        .unwrap();

    // U2 is refused
    let denied = open_edit_modal(&slack, OTHER_USER, &ts).await;
    assert_eq!(denied.view.title.text, "Permission denied");

    // U1 deletes
    let modal = open_edit_modal(&slack, SUBMITTER, &ts).await;
    assert_eq!(prefilled_description(&modal.view).as_deref(), Some("printer fixed"));
    let event = event_from(&delete_click(&modal, SUBMITTER, None));
    assert!(matches!(event, WorkflowEvent::DeleteClicked(_)));
    assert_eq!(
        workflow::dispatch(&slack, event).await.unwrap(),
        StepOutcome::Complete
    );

    assert_eq!(slack.message_count(), 0);
    assert_eq!(slack.opened().len(), 4);
}
