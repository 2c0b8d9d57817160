//! Request records and the state carried through Slack.
//!
//! There is no application database. A [`Request`] lives inside the
//! metadata of the message that announces it, and an [`EditSession`] lives
//! inside the private metadata of the edit modal while it is open.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{ChannelId, MessageTs, UserId};

/// Metadata event type that marks a message as one of ours.
///
/// Part of the wire contract: messages posted by earlier deployments carry
/// this exact tag, so it must never change.
pub const REQUEST_EVENT_TYPE: &str = "editable-workflow-message";

/// A submitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Free-form description entered in the form.
    #[serde(default)]
    pub description: String,
    /// User who submitted the request. Never changes across edits.
    pub submitter_id: UserId,
}

impl Request {
    /// Create a new request.
    #[must_use]
    pub fn new(description: impl Into<String>, submitter_id: UserId) -> Self {
        Self {
            description: description.into(),
            submitter_id,
        }
    }
}

/// Slack message metadata as stored on a posted message.
///
/// The payload is kept as raw JSON because metadata fetched back from Slack
/// may have been written by anything; [`MessageMetadata::request`] decides
/// whether it can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Event type tag.
    pub event_type: String,
    /// Event payload.
    #[serde(default)]
    pub event_payload: serde_json::Value,
}

impl MessageMetadata {
    /// Build the metadata record for a request.
    #[must_use]
    pub fn for_request(request: &Request) -> Self {
        Self {
            event_type: REQUEST_EVENT_TYPE.to_string(),
            event_payload: serde_json::json!({
                "description": request.description,
                "submitterId": request.submitter_id,
            }),
        }
    }

    /// Whether the event type matches [`REQUEST_EVENT_TYPE`].
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.event_type == REQUEST_EVENT_TYPE
    }

    /// Decode the stored request.
    ///
    /// Returns `None` when the tag does not match or the payload has no
    /// usable `submitterId`.
    #[must_use]
    pub fn request(&self) -> Option<Request> {
        if !self.is_request() {
            return None;
        }
        serde_json::from_value(self.event_payload.clone()).ok()
    }
}

/// Context of an open edit modal.
///
/// Serialized into the modal's `private_metadata` when it opens and read back
/// when it is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    /// Channel holding the message.
    pub channel: ChannelId,
    /// Timestamp of the message being edited.
    pub ts: MessageTs,
    /// Original submitter, carried over into the rebuilt message.
    pub submitter_id: UserId,
}

/// Failure to decode an [`EditSession`] from private metadata.
#[derive(Debug, Error)]
#[error("Invalid edit session: {0}")]
pub struct EditSessionError(#[from] serde_json::Error);

impl EditSession {
    /// Encode as the modal's private metadata string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_private_metadata(&self) -> Result<String, EditSessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from the modal's private metadata string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a JSON object with `channel`,
    /// `ts` and `submitterId`.
    pub fn from_private_metadata(raw: &str) -> Result<Self, EditSessionError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_payload_uses_wire_names() {
        let request = Request::new("printer broken", UserId::new("U1"));
        let metadata = MessageMetadata::for_request(&request);

        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({
                "event_type": "editable-workflow-message",
                "event_payload": {"description": "printer broken", "submitterId": "U1"}
            })
        );
    }

    #[test]
    fn test_metadata_request_roundtrip() {
        let request = Request::new("printer broken", UserId::new("U1"));
        let metadata = MessageMetadata::for_request(&request);
        assert_eq!(metadata.request(), Some(request));
    }

    #[test]
    fn test_foreign_event_type_is_ignored() {
        let metadata = MessageMetadata {
            event_type: "some-other-app".to_string(),
            event_payload: json!({"description": "x", "submitterId": "U1"}),
        };
        assert!(metadata.request().is_none());
    }

    #[test]
    fn test_payload_without_submitter_is_ignored() {
        let metadata = MessageMetadata {
            event_type: REQUEST_EVENT_TYPE.to_string(),
            event_payload: json!({"description": "x"}),
        };
        assert!(metadata.request().is_none());
    }

    #[test]
    fn test_payload_without_description_defaults_empty() {
        let metadata = MessageMetadata {
            event_type: REQUEST_EVENT_TYPE.to_string(),
            event_payload: json!({"submitterId": "U1"}),
        };
        let request = metadata.request().unwrap();
        assert_eq!(request.description, "");
        assert_eq!(request.submitter_id, UserId::new("U1"));
    }

    #[test]
    fn test_edit_session_private_metadata_format() {
        let session = EditSession {
            channel: ChannelId::new("C1"),
            ts: MessageTs::new("1700000000.000100"),
            submitter_id: UserId::new("U1"),
        };
        let raw = session.to_private_metadata().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            json!({"channel": "C1", "ts": "1700000000.000100", "submitterId": "U1"})
        );
        assert_eq!(EditSession::from_private_metadata(&raw).unwrap(), session);
    }

    #[test]
    fn test_edit_session_rejects_garbage() {
        assert!(EditSession::from_private_metadata("not json").is_err());
        assert!(EditSession::from_private_metadata(r#"{"channel":"C1"}"#).is_err());
    }
}
