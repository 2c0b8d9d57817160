//! Workflow step handlers.
//!
//! Each handler runs a short sequence of Slack calls and returns a
//! [`StepOutcome`] or a [`StepError`]. No handler retries, and none checks
//! whether the message changed since the modal opened: concurrent edits and
//! deletes resolve as last write wins.

use editable_request_core::{EditSession, StepOutcome, ViewId};
use tracing::{debug, info, instrument, warn};

use super::definition::{REQUEST_FORM, SUBMIT_REQUEST_WORKFLOW};
use super::error::StepError;
use super::events::{DeleteClick, EditClick, EditSubmission, RequestSubmission, WorkflowEvent};
use super::messages::{
    build_deleted_view, build_edit_view, build_form_view, build_invite_message, build_message,
    build_permission_denied_view,
};
use super::permission::{Authorization, authorize};
use crate::slack::{RepliesQuery, SlackApi, SlashCommand};

/// Run the handler for a workflow event.
///
/// # Errors
///
/// Returns the handler's [`StepError`].
pub async fn dispatch<S: SlackApi>(slack: &S, event: WorkflowEvent) -> Result<StepOutcome, StepError> {
    match event {
        WorkflowEvent::RequestSubmitted(submission) => submit_request(slack, &submission).await,
        WorkflowEvent::EditClicked(click) => edit_clicked(slack, &click).await,
        WorkflowEvent::DeleteClicked(click) => delete_clicked(slack, &click).await,
        WorkflowEvent::EditSubmitted(submission) => edit_submitted(slack, &submission).await,
    }
}

/// Start the workflow: open the request form in response to the trigger.
///
/// # Errors
///
/// Returns [`StepError::OpenView`] if the modal cannot be opened.
#[instrument(skip(slack, command), fields(channel = %command.channel_id, user = %command.user_id))]
pub async fn open_request_form<S: SlackApi>(
    slack: &S,
    command: &SlashCommand,
) -> Result<ViewId, StepError> {
    let view = build_form_view(
        SUBMIT_REQUEST_WORKFLOW.callback_id,
        &REQUEST_FORM,
        &command.channel_id,
    );

    let view_id = slack
        .open_view(&command.trigger_id, &view)
        .await
        .map_err(StepError::OpenView)?;

    info!(view_id = %view_id, "Request form opened");
    Ok(view_id)
}

/// Post a submitted request to its channel.
///
/// Joins the channel first. If the bot cannot join, an instruction to invite
/// it is posted instead and the request is not posted.
///
/// # Errors
///
/// Returns [`StepError::JoinChannel`] or [`StepError::PostMessage`].
#[instrument(skip(slack, submission), fields(channel = %submission.channel, submitter = %submission.submitter_id))]
pub async fn submit_request<S: SlackApi>(
    slack: &S,
    submission: &RequestSubmission,
) -> Result<StepOutcome, StepError> {
    let channel = &submission.channel;

    if let Err(source) = slack.join_channel(channel).await {
        warn!(error = %source, code = ?source.api_code(), "Could not join channel, asking for an invite");

        match slack.bot_user_id().await {
            Ok(bot_user_id) => {
                let invite = build_invite_message(&bot_user_id, channel);
                if let Err(e) = slack.post_message(channel, &invite).await {
                    warn!(error = %e, "Failed to post invite instructions");
                }
            }
            Err(e) => warn!(error = %e, "Failed to look up bot user"),
        }

        return Err(StepError::JoinChannel {
            channel: channel.clone(),
            source,
        });
    }

    let message = build_message(&submission.description, &submission.submitter_id);
    let ts = slack
        .post_message(channel, &message)
        .await
        .map_err(|source| StepError::PostMessage {
            channel: channel.clone(),
            source,
        })?;

    info!(ts = %ts, "Request posted");
    Ok(StepOutcome::Continue)
}

/// Open the edit modal, or the denial modal for anyone but the submitter.
///
/// # Errors
///
/// Returns [`StepError::EditOutsideMessage`], [`StepError::MessageUnavailable`]
/// or [`StepError::OpenView`].
#[instrument(skip(slack, click), fields(user = %click.user_id))]
pub async fn edit_clicked<S: SlackApi>(slack: &S, click: &EditClick) -> Result<StepOutcome, StepError> {
    let (Some(channel), Some(ts)) = (&click.channel, &click.message_ts) else {
        return Err(StepError::EditOutsideMessage {
            channel: click
                .channel
                .as_ref()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
        });
    };

    let unavailable = |source| StepError::MessageUnavailable {
        channel: channel.clone(),
        ts: ts.clone(),
        source,
    };

    let messages = slack
        .fetch_replies(&RepliesQuery::single(channel.clone(), ts.clone()))
        .await
        .map_err(|e| unavailable(Some(e)))?;
    let metadata = messages
        .into_iter()
        .next()
        .and_then(|message| message.metadata)
        .ok_or_else(|| unavailable(None))?;

    let request = match authorize(Some(&metadata), &click.user_id) {
        Authorization::Granted(request) => request,
        Authorization::Denied(reason) => {
            info!(?reason, "Edit refused");
            slack
                .open_view(&click.trigger_id, &build_permission_denied_view())
                .await
                .map_err(StepError::OpenView)?;
            return Ok(StepOutcome::Continue);
        }
    };

    let session = EditSession {
        channel: channel.clone(),
        ts: ts.clone(),
        submitter_id: request.submitter_id,
    };
    let view = build_edit_view(&session, &request.description)?;
    slack
        .open_view(&click.trigger_id, &view)
        .await
        .map_err(StepError::OpenView)?;

    debug!("Edit modal opened");
    Ok(StepOutcome::Continue)
}

/// Delete the request message and confirm in the modal.
///
/// The target comes from the button alone. The modal's private metadata is
/// not consulted, and a failed confirmation does not undo the deletion.
///
/// # Errors
///
/// Returns [`StepError::DeleteTargetMissing`], [`StepError::DeleteMessage`]
/// or [`StepError::UpdateView`].
#[instrument(skip(slack, click), fields(user = %click.user_id))]
pub async fn delete_clicked<S: SlackApi>(
    slack: &S,
    click: &DeleteClick,
) -> Result<StepOutcome, StepError> {
    let channel = click
        .channel
        .as_ref()
        .ok_or(StepError::DeleteTargetMissing("channel"))?;
    let ts = click
        .ts
        .as_ref()
        .ok_or(StepError::DeleteTargetMissing("ts"))?;

    slack
        .delete_message(channel, ts)
        .await
        .map_err(StepError::DeleteMessage)?;
    info!(channel = %channel, ts = %ts, "Request deleted");

    if let Some(view_id) = &click.view_id {
        slack
            .update_view(view_id, &build_deleted_view())
            .await
            .map_err(StepError::UpdateView)?;
    }

    Ok(StepOutcome::Complete)
}

/// Write an edited description back to the request message.
///
/// The submitter recorded in the session is kept, so an edit can never
/// reassign authorship.
///
/// # Errors
///
/// Returns [`StepError::InvalidSession`] or [`StepError::ModifyMessage`].
#[instrument(skip(slack, submission), fields(user = %submission.user_id, view_id = %submission.view_id))]
pub async fn edit_submitted<S: SlackApi>(
    slack: &S,
    submission: &EditSubmission,
) -> Result<StepOutcome, StepError> {
    let session = EditSession::from_private_metadata(&submission.private_metadata)?;
    let message = build_message(&submission.description, &session.submitter_id);

    slack
        .update_message(&session.channel, &session.ts, &message)
        .await
        .map_err(StepError::ModifyMessage)?;

    info!(channel = %session.channel, ts = %session.ts, "Request modified");
    Ok(StepOutcome::Continue)
}
