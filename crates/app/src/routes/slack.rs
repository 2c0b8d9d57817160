//! Slack webhook handlers.
//!
//! Slash commands start the workflow; interactions carry button clicks and
//! modal submissions. Every request is signature-checked before parsing.
//! Once a request is authenticated Slack always gets `200 OK`: workflow
//! failures are logged and reported, not returned.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use editable_request_core::{ChannelId, TriggerId, UserId};
use tracing::{debug, error, info, instrument, warn};

use crate::error::AppError;
use crate::slack::{InteractionPayload, SlashCommand};
use crate::state::AppState;
use crate::workflow::definition::{SUBMIT_REQUEST_TRIGGER, TriggerKind};
use crate::workflow::{self, WorkflowEvent};

/// Slash command request URL path.
pub const COMMANDS_PATH: &str = "/slack/commands";

/// Interactivity request URL path.
pub const INTERACTIONS_PATH: &str = "/slack/interactions";

const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
const SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// Create Slack webhook routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(COMMANDS_PATH, post(handle_command))
        .route(INTERACTIONS_PATH, post(handle_interaction))
}

/// Handle a slash command.
///
/// Only the workflow trigger command is acted on; it opens the request form.
#[instrument(skip(state, headers, body))]
async fn handle_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    verify_request(&state, &headers, &body)?;

    let command = parse_slash_command(&body)?;
    if !is_trigger_command(&command.command) {
        warn!(command = %command.command, "Unknown slash command");
        return Ok(StatusCode::OK);
    }

    info!(channel = %command.channel_id, user = %command.user_id, "Workflow triggered");
    if let Err(e) = workflow::open_request_form(state.slack(), &command).await {
        let event_id = sentry::capture_error(&e);
        error!(error = %e, sentry_event_id = %event_id, "Failed to start workflow");
    }

    Ok(StatusCode::OK)
}

/// Handle an interaction (button click or modal submission).
///
/// An empty `200 OK` closes a submitted modal.
///
/// The workflow step runs to completion before the acknowledgement is sent,
/// so its Slack calls must fit inside Slack's 3 second ack window. Each step
/// makes at most three sequential Web API calls. Past the window Slack shows
/// the user an error even though the step itself went through, and an
/// expired `trigger_id` makes `views.open` fail.
#[instrument(skip(state, headers, body))]
async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    verify_request(&state, &headers, &body)?;

    let payload = parse_interaction(&body)?;
    let Some(event) = WorkflowEvent::from_interaction(payload)? else {
        debug!("Ignoring unhandled interaction");
        return Ok(StatusCode::OK);
    };

    let name = event.name();
    match workflow::dispatch(state.slack(), event).await {
        Ok(outcome) if outcome.is_complete() => info!(event = name, "Workflow completed"),
        Ok(outcome) => info!(event = name, %outcome, "Workflow step finished"),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            error!(event = name, error = %e, sentry_event_id = %event_id, "Workflow step failed");
        }
    }

    Ok(StatusCode::OK)
}

/// Check the Slack signature headers against the raw body.
fn verify_request(state: &AppState, headers: &HeaderMap, body: &str) -> Result<(), AppError> {
    let timestamp = headers
        .get(TIMESTAMP_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing timestamp header".into()))?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing signature header".into()))?;

    state
        .slack()
        .verify_signature(timestamp, body, signature)
        .map_err(|e| AppError::Unauthorized(e.to_string()))
}

fn is_trigger_command(command: &str) -> bool {
    match SUBMIT_REQUEST_TRIGGER.kind {
        TriggerKind::SlashCommand { command: trigger } => command == trigger,
    }
}

/// Parse a form-encoded slash command body.
pub(crate) fn parse_slash_command(body: &str) -> Result<SlashCommand, AppError> {
    let mut command = None;
    let mut channel_id = None;
    let mut user_id = None;
    let mut trigger_id = None;

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "command" => command = Some(value.into_owned()),
            "channel_id" => channel_id = Some(ChannelId::new(value)),
            "user_id" => user_id = Some(UserId::new(value)),
            "trigger_id" => trigger_id = Some(TriggerId::new(value)),
            _ => {}
        }
    }

    let missing = |field: &str| AppError::BadRequest(format!("Missing slash command field: {field}"));

    Ok(SlashCommand {
        command: command.ok_or_else(|| missing("command"))?,
        channel_id: channel_id.ok_or_else(|| missing("channel_id"))?,
        user_id: user_id.ok_or_else(|| missing("user_id"))?,
        trigger_id: trigger_id.ok_or_else(|| missing("trigger_id"))?,
    })
}

/// Parse the `payload` field of a form-encoded interaction body.
pub(crate) fn parse_interaction(body: &str) -> Result<InteractionPayload, AppError> {
    let payload = url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value)
        .ok_or_else(|| AppError::BadRequest("Invalid payload format".into()))?;

    serde_json::from_str(&payload)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse payload: {e}")))
}
