//! The editable request workflow.
//!
//! A request is submitted through a form, posted to a channel with an Edit
//! button, and can later be edited or deleted by its submitter only. The
//! request itself lives in the message metadata; nothing is stored locally.
//!
//! # Modules
//!
//! - [`definition`] - Declarative workflow, form and trigger definitions
//! - `events` - Typed events extracted from interaction payloads
//! - `handlers` - One handler per interaction
//! - `messages` - Message and modal builders
//! - `permission` - Submitter-only authorization

pub mod definition;
mod error;
mod events;
mod handlers;
mod messages;
mod permission;

pub use error::StepError;
pub use events::{DeleteClick, EditClick, EditSubmission, RequestSubmission, WorkflowEvent};
pub use handlers::{
    delete_clicked, dispatch, edit_clicked, edit_submitted, open_request_form, submit_request,
};
pub use messages::{
    build_deleted_view, build_edit_view, build_form_view, build_invite_message, build_message,
    build_permission_denied_view,
};
pub use permission::{Authorization, DenialReason, authorize};

// Wire contract identifiers. Posted messages and open modals reference these,
// so they must stay stable across deployments.

/// Action ID of the Edit button on request messages.
pub const EDIT_ACTION_ID: &str = "edit-message";
/// Action ID of the Delete button in the edit modal.
pub const DELETE_ACTION_ID: &str = "delete-message";
/// Callback ID of the edit and permission denied modals.
pub const EDIT_CALLBACK_ID: &str = "edit-message";
/// Callback ID of the deletion confirmation modal.
pub const DELETED_CALLBACK_ID: &str = "message-deleted";
/// Block ID of the description input in the edit modal.
pub const DESCRIPTION_BLOCK_ID: &str = "description";
/// Action ID of text inputs in form and edit modals.
pub const INPUT_ACTION_ID: &str = "input";
