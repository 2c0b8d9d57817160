//! Edit/delete authorization.
//!
//! Only the user recorded as the submitter in the message metadata may edit
//! or delete a request message.

use editable_request_core::{MessageMetadata, Request, UserId};

/// Why an actor was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The message has no metadata.
    MissingMetadata,
    /// The metadata was written by something else.
    ForeignEventType,
    /// The payload has no readable submitter.
    UnreadablePayload,
    /// The actor is not the submitter.
    NotSubmitter,
}

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The actor submitted the request.
    Granted(Request),
    /// The actor may not touch the message.
    Denied(DenialReason),
}

/// Decide whether `actor` may edit or delete the message carrying `metadata`.
#[must_use]
pub fn authorize(metadata: Option<&MessageMetadata>, actor: &UserId) -> Authorization {
    let Some(metadata) = metadata else {
        return Authorization::Denied(DenialReason::MissingMetadata);
    };
    if !metadata.is_request() {
        return Authorization::Denied(DenialReason::ForeignEventType);
    }
    match metadata.request() {
        Some(request) if request.submitter_id == *actor => Authorization::Granted(request),
        Some(_) => Authorization::Denied(DenialReason::NotSubmitter),
        None => Authorization::Denied(DenialReason::UnreadablePayload),
    }
}
