//! Typed workflow events extracted from Slack interaction payloads.

use editable_request_core::{ChannelId, MessageTs, TriggerId, UserId, ViewId};

use super::definition::{DESCRIPTION_FIELD, SUBMIT_REQUEST_WORKFLOW};
use super::{DELETE_ACTION_ID, DESCRIPTION_BLOCK_ID, EDIT_ACTION_ID, EDIT_CALLBACK_ID, INPUT_ACTION_ID};
use crate::slack::{BlockActionsPayload, InteractionPayload, SlackError, ViewSubmissionPayload};

/// The request form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSubmission {
    /// Channel the request is posted to.
    pub channel: ChannelId,
    /// User who filled in the form.
    pub submitter_id: UserId,
    /// Entered description.
    pub description: String,
}

/// The Edit button on a request message was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditClick {
    /// Clicking user.
    pub user_id: UserId,
    /// Trigger for opening a modal.
    pub trigger_id: TriggerId,
    /// Channel of the enclosing message.
    pub channel: Option<ChannelId>,
    /// Timestamp of the enclosing message, absent outside messages.
    pub message_ts: Option<MessageTs>,
}

/// The Delete button in the edit modal was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClick {
    /// Clicking user.
    pub user_id: UserId,
    /// Channel of the message to delete.
    pub channel: Option<ChannelId>,
    /// Timestamp carried by the button.
    pub ts: Option<MessageTs>,
    /// Modal hosting the button, if any.
    pub view_id: Option<ViewId>,
    /// Raw private metadata of the hosting modal. Never used to pick the target.
    pub private_metadata: Option<String>,
}

/// The edit modal was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSubmission {
    /// Submitting user.
    pub user_id: UserId,
    /// Submitted view.
    pub view_id: ViewId,
    /// Raw private metadata holding the edit session.
    pub private_metadata: String,
    /// New description.
    pub description: String,
}

/// An interaction the workflow handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    RequestSubmitted(RequestSubmission),
    EditClicked(EditClick),
    DeleteClicked(DeleteClick),
    EditSubmitted(EditSubmission),
}

impl WorkflowEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RequestSubmitted(_) => "request_submitted",
            Self::EditClicked(_) => "edit_clicked",
            Self::DeleteClicked(_) => "delete_clicked",
            Self::EditSubmitted(_) => "edit_submitted",
        }
    }

    /// Extract the workflow event from an interaction payload.
    ///
    /// Returns `Ok(None)` for interactions this app does not handle.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::InvalidPayload`] when a handled interaction lacks
    /// a field Slack always sends for it.
    pub fn from_interaction(payload: InteractionPayload) -> Result<Option<Self>, SlackError> {
        match payload {
            InteractionPayload::BlockActions(actions) => Ok(Self::from_block_actions(actions)),
            InteractionPayload::ViewSubmission(submission) => Self::from_view_submission(submission),
            InteractionPayload::Unsupported => Ok(None),
        }
    }

    fn from_block_actions(payload: BlockActionsPayload) -> Option<Self> {
        let action = payload.actions.into_iter().next()?;
        let channel = payload.channel.map(|c| c.id);

        match action.action_id.as_str() {
            EDIT_ACTION_ID => Some(Self::EditClicked(EditClick {
                user_id: payload.user.id,
                trigger_id: payload.trigger_id,
                channel,
                message_ts: payload.message.map(|m| m.ts),
            })),
            DELETE_ACTION_ID => Some(Self::DeleteClicked(DeleteClick {
                user_id: payload.user.id,
                // Modal actions carry no channel; the edit view stores it as the block ID.
                channel: channel.or_else(|| action.block_id.map(ChannelId::from)),
                ts: action.value.filter(|v| !v.is_empty()).map(MessageTs::from),
                view_id: payload.view.as_ref().map(|v| v.id.clone()),
                private_metadata: payload.view.map(|v| v.private_metadata),
            })),
            _ => None,
        }
    }

    fn from_view_submission(payload: ViewSubmissionPayload) -> Result<Option<Self>, SlackError> {
        let view = payload.view;

        if view.callback_id == SUBMIT_REQUEST_WORKFLOW.callback_id {
            let description = view
                .state
                .text(DESCRIPTION_FIELD.name, INPUT_ACTION_ID)
                .ok_or_else(|| missing_input(DESCRIPTION_FIELD.name))?
                .to_string();
            if view.private_metadata.is_empty() {
                return Err(SlackError::InvalidPayload(
                    "request form has no channel".to_string(),
                ));
            }

            return Ok(Some(Self::RequestSubmitted(RequestSubmission {
                channel: ChannelId::new(view.private_metadata),
                submitter_id: payload.user.id,
                description,
            })));
        }

        if view.callback_id == EDIT_CALLBACK_ID {
            let description = view
                .state
                .text(DESCRIPTION_BLOCK_ID, INPUT_ACTION_ID)
                .ok_or_else(|| missing_input(DESCRIPTION_BLOCK_ID))?
                .to_string();

            return Ok(Some(Self::EditSubmitted(EditSubmission {
                user_id: payload.user.id,
                view_id: view.id,
                private_metadata: view.private_metadata,
                description,
            })));
        }

        Ok(None)
    }
}

fn missing_input(block_id: &str) -> SlackError {
    SlackError::InvalidPayload(format!("missing input value for block `{block_id}`"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn event(payload: Value) -> Option<WorkflowEvent> {
        let payload: InteractionPayload = serde_json::from_value(payload).unwrap();
        WorkflowEvent::from_interaction(payload).unwrap()
    }

    #[test]
    fn test_edit_click_from_message_button() {
        let parsed = event(json!({
            "type": "block_actions",
            "user": {"id": "U1"},
            "trigger_id": "t1",
            "channel": {"id": "C1"},
            "message": {"ts": "1.0"},
            "actions": [{"action_id": "edit-message", "value": "clicked"}]
        }));

        assert_eq!(
            parsed,
            Some(WorkflowEvent::EditClicked(EditClick {
                user_id: UserId::new("U1"),
                trigger_id: TriggerId::new("t1"),
                channel: Some(ChannelId::new("C1")),
                message_ts: Some(MessageTs::new("1.0")),
            }))
        );
    }

    #[test]
    fn test_delete_click_from_modal_uses_block_id_channel() {
        let parsed = event(json!({
            "type": "block_actions",
            "user": {"id": "U1"},
            "trigger_id": "t2",
            "view": {"id": "V1", "callback_id": "edit-message", "private_metadata": "{oops"},
            "actions": [{"action_id": "delete-message", "block_id": "C1", "value": "1.0"}]
        }));

        let Some(WorkflowEvent::DeleteClicked(click)) = parsed else {
            panic!("expected delete click");
        };
        assert_eq!(click.channel, Some(ChannelId::new("C1")));
        assert_eq!(click.ts, Some(MessageTs::new("1.0")));
        assert_eq!(click.view_id, Some(ViewId::new("V1")));
        assert_eq!(click.private_metadata.as_deref(), Some("{oops"));
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let parsed = event(json!({
            "type": "block_actions",
            "user": {"id": "U1"},
            "trigger_id": "t",
            "actions": [{"action_id": "approve"}]
        }));
        assert!(parsed.is_none());
    }

    #[test]
    fn test_request_form_submission() {
        let parsed = event(json!({
            "type": "view_submission",
            "user": {"id": "U1"},
            "view": {
                "id": "V1",
                "callback_id": "submit-editable-request",
                "private_metadata": "C1",
                "state": {"values": {"description": {"input": {"value": "printer broken"}}}}
            }
        }));

        assert_eq!(
            parsed,
            Some(WorkflowEvent::RequestSubmitted(RequestSubmission {
                channel: ChannelId::new("C1"),
                submitter_id: UserId::new("U1"),
                description: "printer broken".to_string(),
            }))
        );
    }

    #[test]
    fn test_edit_submission() {
        let parsed = event(json!({
            "type": "view_submission",
            "user": {"id": "U1"},
            "view": {
                "id": "V9",
                "callback_id": "edit-message",
                "private_metadata": "{\"channel\":\"C1\",\"ts\":\"1.0\",\"submitterId\":\"U1\"}",
                "state": {"values": {"description": {"input": {"value": "printer fixed"}}}}
            }
        }));

        let Some(WorkflowEvent::EditSubmitted(submission)) = parsed else {
            panic!("expected edit submission");
        };
        assert_eq!(submission.view_id, ViewId::new("V9"));
        assert_eq!(submission.description, "printer fixed");
    }

    #[test]
    fn test_submission_without_description_is_invalid() {
        let payload: InteractionPayload = serde_json::from_value(json!({
            "type": "view_submission",
            "user": {"id": "U1"},
            "view": {"id": "V1", "callback_id": "edit-message", "private_metadata": "{}"}
        }))
        .unwrap();

        assert!(matches!(
            WorkflowEvent::from_interaction(payload),
            Err(SlackError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_unknown_view_is_ignored() {
        let parsed = event(json!({
            "type": "view_submission",
            "user": {"id": "U1"},
            "view": {"id": "V1", "callback_id": "message-deleted"}
        }));
        assert!(parsed.is_none());
    }
}
