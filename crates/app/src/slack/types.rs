//! Slack Block Kit, Web API and interactivity types.
//!
//! These types represent the subset of the Slack platform used by the
//! editable request workflow: section and input blocks, modal views,
//! message metadata, and the `block_actions` / `view_submission` payloads.
//!
//! See: <https://api.slack.com/block-kit>

use std::collections::HashMap;

use editable_request_core::{ChannelId, MessageMetadata, MessageTs, TriggerId, UserId, ViewId};
use serde::{Deserialize, Serialize};

/// Message content as posted or updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageContent {
    /// Plain text fallback (notifications, screen readers).
    pub text: String,
    /// Message blocks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    /// Structured metadata attached to the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl MessageContent {
    /// A text-only message without blocks or metadata.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: Vec::new(),
            metadata: None,
        }
    }
}

/// Block Kit block types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Section block with text and optional accessory.
    Section {
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    /// Input block (modals only).
    Input {
        block_id: String,
        element: InputElement,
        label: PlainText,
        /// Let the modal submit without a value.
        optional: bool,
    },
}

/// Text object types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// Plain text object (for labels, titles and buttons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    /// Create a new plain text object.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Accessory elements for section blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    /// Button accessory.
    Button {
        text: PlainText,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
    },
}

/// Input block elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    /// Free text input.
    PlainTextInput {
        action_id: String,
        multiline: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        initial_value: Option<String>,
    },
}

/// Button style (affects color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    /// Red danger button.
    Danger,
}

/// A modal view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    #[serde(rename = "type")]
    pub view_type: &'static str,
    pub callback_id: String,
    pub title: PlainText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<PlainText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<PlainText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_metadata: Option<String>,
    pub blocks: Vec<Block>,
}

impl View {
    /// Create a modal with a title and a "Close" button.
    #[must_use]
    pub fn modal(callback_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            view_type: "modal",
            callback_id: callback_id.into(),
            title: PlainText::new(title),
            submit: None,
            close: Some(PlainText::new("Close")),
            private_metadata: None,
            blocks: Vec::new(),
        }
    }

    /// Add a submit button.
    #[must_use]
    pub fn submit(mut self, label: impl Into<String>) -> Self {
        self.submit = Some(PlainText::new(label));
        self
    }

    /// Attach private metadata, returned verbatim on submission.
    #[must_use]
    pub fn private_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.private_metadata = Some(metadata.into());
        self
    }

    /// Append a block.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Common envelope of every Web API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request was successful.
    pub ok: bool,
    /// Error code if not ok.
    #[serde(default)]
    pub error: Option<String>,
    /// Method-specific fields.
    #[serde(flatten)]
    pub data: T,
}

/// Response from `chat.postMessage`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMessageResponse {
    /// Message timestamp (unique ID).
    #[serde(default)]
    pub ts: Option<MessageTs>,
}

/// Response with no fields beyond the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmptyResponse {}

/// Response from `conversations.replies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepliesResponse {
    /// Messages, parent first.
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// A message as returned by history and replies calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryMessage {
    /// Message timestamp.
    pub ts: MessageTs,
    /// Fallback text.
    #[serde(default)]
    pub text: String,
    /// Metadata, present only when requested with `include_all_metadata`.
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
}

/// Response from `auth.test`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthTestResponse {
    /// Bot user ID of the token owner.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Response from `views.open` / `views.update`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewResponse {
    /// The view as stored by Slack.
    #[serde(default)]
    pub view: Option<OpenedView>,
}

/// View identity returned by Slack.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenedView {
    /// View ID.
    pub id: ViewId,
}

/// Query for `conversations.replies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepliesQuery {
    pub channel: ChannelId,
    pub ts: MessageTs,
    pub inclusive: bool,
    pub include_all_metadata: bool,
    pub limit: u32,
}

impl RepliesQuery {
    /// Query for exactly the message at `ts`, metadata included.
    #[must_use]
    pub const fn single(channel: ChannelId, ts: MessageTs) -> Self {
        Self {
            channel,
            ts,
            inclusive: true,
            include_all_metadata: true,
            limit: 1,
        }
    }
}

// =============================================================================
// Interactivity
// =============================================================================

/// Slack interaction payload (`payload=` form field).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionPayload {
    /// A button or other interactive element was used.
    BlockActions(BlockActionsPayload),
    /// A modal was submitted.
    ViewSubmission(ViewSubmissionPayload),
    /// Any interaction type this app does not handle.
    #[serde(other)]
    Unsupported,
}

/// `block_actions` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockActionsPayload {
    /// User who triggered the interaction.
    pub user: InteractionUser,
    /// Trigger ID for opening modals.
    pub trigger_id: TriggerId,
    /// Channel where interaction occurred (message buttons only).
    #[serde(default)]
    pub channel: Option<InteractionChannel>,
    /// Message containing the button (message buttons only).
    #[serde(default)]
    pub message: Option<InteractionMessage>,
    /// View containing the button (modal buttons only).
    #[serde(default)]
    pub view: Option<InteractionView>,
    /// Actions that were triggered.
    pub actions: Vec<InteractionAction>,
}

/// `view_submission` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSubmissionPayload {
    /// User who submitted the modal.
    pub user: InteractionUser,
    /// The submitted view.
    pub view: InteractionView,
}

/// User who triggered an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    /// Slack user ID.
    pub id: UserId,
}

/// Channel where interaction occurred.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionChannel {
    /// Channel ID.
    pub id: ChannelId,
}

/// Message that hosted an interactive element.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMessage {
    /// Message timestamp.
    pub ts: MessageTs,
}

/// Modal view attached to an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionView {
    /// View ID.
    pub id: ViewId,
    /// Callback ID set when the view was opened.
    #[serde(default)]
    pub callback_id: String,
    /// Private metadata set when the view was opened.
    #[serde(default)]
    pub private_metadata: String,
    /// Current input values.
    #[serde(default)]
    pub state: ViewState,
}

/// Input values of a view, keyed by block ID then action ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub values: HashMap<String, HashMap<String, InputValue>>,
}

impl ViewState {
    /// Text value of the input at `block_id` / `action_id`.
    #[must_use]
    pub fn text(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.values
            .get(block_id)
            .and_then(|block| block.get(action_id))
            .and_then(|input| input.value.as_deref())
    }
}

/// A single input value.
#[derive(Debug, Clone, Deserialize)]
pub struct InputValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// Action that was triggered.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionAction {
    /// Action ID (set when creating the button).
    pub action_id: String,
    /// Block ID containing this action.
    #[serde(default)]
    pub block_id: Option<String>,
    /// Value attached to the action.
    #[serde(default)]
    pub value: Option<String>,
}

/// Slash command invocation (form-encoded body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    /// Command name including the slash.
    pub command: String,
    /// Channel the command was run in.
    pub channel_id: ChannelId,
    /// Invoking user.
    pub user_id: UserId,
    /// Trigger ID for opening modals.
    pub trigger_id: TriggerId,
}
