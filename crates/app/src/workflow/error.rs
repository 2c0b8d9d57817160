//! Workflow step failures.

use editable_request_core::{ChannelId, EditSessionError, MessageTs};
use thiserror::Error;

use crate::slack::SlackError;

/// Failure of a workflow step handler.
///
/// Each variant names the operation that failed. A refused edit is not an
/// error: the handler shows a denial modal and returns normally.
#[derive(Debug, Error)]
pub enum StepError {
    /// The bot could not join the target channel.
    #[error("Failed to join a channel: <#{channel}>")]
    JoinChannel {
        channel: ChannelId,
        #[source]
        source: SlackError,
    },

    /// Posting the request message failed.
    #[error("Failed to post a message (channel: {channel}, error: {source})")]
    PostMessage {
        channel: ChannelId,
        #[source]
        source: SlackError,
    },

    /// The Edit button fired somewhere other than a channel message.
    #[error(
        "The \"edit\" button is unexpectedly positioned in the non-channel message user interface! (channel: {channel})"
    )]
    EditOutsideMessage { channel: String },

    /// The original message or its metadata could not be read.
    #[error("Failed to access a message (channel: {channel}, ts: {ts})")]
    MessageUnavailable {
        channel: ChannelId,
        ts: MessageTs,
        #[source]
        source: Option<SlackError>,
    },

    /// Opening a modal failed.
    #[error("Failed to open a modal view (error: {0})")]
    OpenView(#[source] SlackError),

    /// The Delete button did not identify a message.
    #[error("Failed to delete a message (error: missing {0})")]
    DeleteTargetMissing(&'static str),

    /// Deleting the message failed.
    #[error("Failed to delete a message (error: {0})")]
    DeleteMessage(#[source] SlackError),

    /// Replacing a modal failed.
    #[error("Failed to update a modal view (error: {0})")]
    UpdateView(#[source] SlackError),

    /// Updating the message in place failed.
    #[error("Failed to modify a message (error: {0})")]
    ModifyMessage(#[source] SlackError),

    /// The edit modal's private metadata could not be read or written.
    #[error(transparent)]
    InvalidSession(#[from] EditSessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_channel_message() {
        let err = StepError::JoinChannel {
            channel: ChannelId::new("C1"),
            source: SlackError::Api("channel_not_found".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to join a channel: <#C1>");
    }

    #[test]
    fn test_post_message_includes_channel_and_cause() {
        let err = StepError::PostMessage {
            channel: ChannelId::new("C1"),
            source: SlackError::Api("is_archived".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to post a message (channel: C1, error: is_archived)"
        );
    }

    #[test]
    fn test_message_unavailable_includes_location() {
        let err = StepError::MessageUnavailable {
            channel: ChannelId::new("C1"),
            ts: MessageTs::new("1700000000.000100"),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "Failed to access a message (channel: C1, ts: 1700000000.000100)"
        );
    }

    #[test]
    fn test_slack_failures_embed_error_code() {
        let cases = [
            (
                StepError::OpenView(SlackError::Api("expired_trigger_id".to_string())),
                "Failed to open a modal view (error: expired_trigger_id)",
            ),
            (
                StepError::DeleteMessage(SlackError::Api("message_not_found".to_string())),
                "Failed to delete a message (error: message_not_found)",
            ),
            (
                StepError::UpdateView(SlackError::Api("not_found".to_string())),
                "Failed to update a modal view (error: not_found)",
            ),
            (
                StepError::ModifyMessage(SlackError::Api("cant_update_message".to_string())),
                "Failed to modify a message (error: cant_update_message)",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
