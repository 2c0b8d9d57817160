//! Integration test support for Editable Request.
//!
//! Provides [`FakeSlack`], an in-memory [`SlackApi`] that stores messages
//! by `(channel, ts)` and records every call, plus helpers that build the
//! interaction payloads Slack would send for a given modal or message.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p editable-request-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use editable_request_app::slack::{
    Accessory, Block, HistoryMessage, InputElement, InteractionPayload, MessageContent, RepliesQuery,
    SlackApi, SlackError, View,
};
use editable_request_app::workflow::WorkflowEvent;
use editable_request_core::{ChannelId, MessageTs, TriggerId, UserId, ViewId};
use serde_json::{Value, json};

/// Web API methods of the fake, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Join,
    PostMessage,
    Replies,
    Delete,
    Update,
    OpenView,
    UpdateView,
    AuthTest,
}

/// A modal opened through `views.open`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedModal {
    pub trigger_id: TriggerId,
    pub view_id: ViewId,
    pub view: View,
}

#[derive(Debug, Default)]
struct FakeState {
    messages: HashMap<(ChannelId, MessageTs), MessageContent>,
    next_ts: u64,
    next_view: u64,
    joined: HashSet<ChannelId>,
    posted: Vec<(ChannelId, MessageContent)>,
    deleted: Vec<(ChannelId, MessageTs)>,
    opened: Vec<OpenedModal>,
    view_updates: Vec<(ViewId, View)>,
    failures: HashMap<Method, String>,
}

/// In-memory Slack workspace.
#[derive(Debug)]
pub struct FakeSlack {
    bot_user_id: UserId,
    state: Mutex<FakeState>,
}

impl Default for FakeSlack {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSlack {
    /// Create an empty workspace with bot user `UBOT`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bot_user_id: UserId::new("UBOT"),
            state: Mutex::new(FakeState {
                next_ts: 1_700_000_000,
                ..FakeState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every call to `method` fail with the Slack error `code`.
    pub fn fail(&self, method: Method, code: &str) {
        self.state().failures.insert(method, code.to_string());
    }

    fn check(&self, method: Method) -> Result<(), SlackError> {
        match self.state().failures.get(&method) {
            Some(code) => Err(SlackError::Api(code.clone())),
            None => Ok(()),
        }
    }

    /// Insert a message directly, as if posted by someone else.
    pub fn seed_message(&self, channel: &ChannelId, content: MessageContent) -> MessageTs {
        let mut state = self.state();
        let ts = next_ts(&mut state);
        state.messages.insert((channel.clone(), ts.clone()), content);
        ts
    }

    /// Current content of a message, if it still exists.
    #[must_use]
    pub fn message(&self, channel: &ChannelId, ts: &MessageTs) -> Option<MessageContent> {
        self.state()
            .messages
            .get(&(channel.clone(), ts.clone()))
            .cloned()
    }

    /// Number of messages currently stored.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.state().messages.len()
    }

    /// Every successful `chat.postMessage`, in order.
    #[must_use]
    pub fn posted(&self) -> Vec<(ChannelId, MessageContent)> {
        self.state().posted.clone()
    }

    /// Every successful `chat.delete`, in order.
    #[must_use]
    pub fn deleted(&self) -> Vec<(ChannelId, MessageTs)> {
        self.state().deleted.clone()
    }

    /// Every modal opened, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<OpenedModal> {
        self.state().opened.clone()
    }

    /// The most recently opened modal.
    #[must_use]
    pub fn last_opened(&self) -> Option<OpenedModal> {
        self.state().opened.last().cloned()
    }

    /// Every `views.update`, in order.
    #[must_use]
    pub fn view_updates(&self) -> Vec<(ViewId, View)> {
        self.state().view_updates.clone()
    }

    /// Whether the bot joined `channel`.
    #[must_use]
    pub fn has_joined(&self, channel: &ChannelId) -> bool {
        self.state().joined.contains(channel)
    }

    /// Timestamp of the most recently posted message in `channel`.
    #[must_use]
    pub fn latest_ts(&self, channel: &ChannelId) -> Option<MessageTs> {
        let state = self.state();
        state
            .messages
            .keys()
            .filter(|(c, _)| c == channel)
            .map(|(_, ts)| ts.clone())
            .max_by(|a, b| a.as_str().cmp(b.as_str()))
    }
}

fn next_ts(state: &mut FakeState) -> MessageTs {
    state.next_ts += 1;
    MessageTs::new(format!("{}.000100", state.next_ts))
}

impl SlackApi for FakeSlack {
    async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        self.check(Method::Join)?;
        self.state().joined.insert(channel.clone());
        Ok(())
    }

    async fn post_message(
        &self,
        channel: &ChannelId,
        content: &MessageContent,
    ) -> Result<MessageTs, SlackError> {
        self.check(Method::PostMessage)?;
        let mut state = self.state();
        let ts = next_ts(&mut state);
        state
            .messages
            .insert((channel.clone(), ts.clone()), content.clone());
        state.posted.push((channel.clone(), content.clone()));
        Ok(ts)
    }

    async fn fetch_replies(&self, query: &RepliesQuery) -> Result<Vec<HistoryMessage>, SlackError> {
        self.check(Method::Replies)?;
        let state = self.state();
        let key = (query.channel.clone(), query.ts.clone());
        let message = state
            .messages
            .get(&key)
            .ok_or_else(|| SlackError::Api("thread_not_found".to_string()))?;

        Ok(vec![HistoryMessage {
            ts: query.ts.clone(),
            text: message.text.clone(),
            metadata: if query.include_all_metadata {
                message.metadata.clone()
            } else {
                None
            },
        }])
    }

    async fn delete_message(&self, channel: &ChannelId, ts: &MessageTs) -> Result<(), SlackError> {
        self.check(Method::Delete)?;
        let mut state = self.state();
        state
            .messages
            .remove(&(channel.clone(), ts.clone()))
            .ok_or_else(|| SlackError::Api("message_not_found".to_string()))?;
        state.deleted.push((channel.clone(), ts.clone()));
        Ok(())
    }

    async fn update_message(
        &self,
        channel: &ChannelId,
        ts: &MessageTs,
        content: &MessageContent,
    ) -> Result<(), SlackError> {
        self.check(Method::Update)?;
        let mut state = self.state();
        let message = state
            .messages
            .get_mut(&(channel.clone(), ts.clone()))
            .ok_or_else(|| SlackError::Api("message_not_found".to_string()))?;
        *message = content.clone();
        Ok(())
    }

    async fn open_view(&self, trigger_id: &TriggerId, view: &View) -> Result<ViewId, SlackError> {
        self.check(Method::OpenView)?;
        let mut state = self.state();
        state.next_view += 1;
        let view_id = ViewId::new(format!("V{:04}", state.next_view));
        state.opened.push(OpenedModal {
            trigger_id: trigger_id.clone(),
            view_id: view_id.clone(),
            view: view.clone(),
        });
        Ok(view_id)
    }

    async fn update_view(&self, view_id: &ViewId, view: &View) -> Result<(), SlackError> {
        self.check(Method::UpdateView)?;
        self.state()
            .view_updates
            .push((view_id.clone(), view.clone()));
        Ok(())
    }

    async fn bot_user_id(&self) -> Result<UserId, SlackError> {
        self.check(Method::AuthTest)?;
        Ok(self.bot_user_id.clone())
    }
}

// =============================================================================
// Interaction Payloads
// =============================================================================

/// Turn a JSON interaction payload into a workflow event.
///
/// # Panics
///
/// Panics if the payload does not parse or maps to no event.
#[must_use]
pub fn event_from(payload: &Value) -> WorkflowEvent {
    let payload: InteractionPayload =
        serde_json::from_value(payload.clone()).unwrap_or_else(|e| panic!("bad payload: {e}"));
    WorkflowEvent::from_interaction(payload)
        .unwrap_or_else(|e| panic!("unroutable payload: {e}"))
        .unwrap_or_else(|| panic!("payload maps to no workflow event"))
}

/// Submission of a form or edit modal with `description` entered.
#[must_use]
pub fn modal_submission(modal: &OpenedModal, user: &str, description: &str) -> Value {
    json!({
        "type": "view_submission",
        "user": {"id": user},
        "view": {
            "id": modal.view_id,
            "callback_id": modal.view.callback_id,
            "private_metadata": modal.view.private_metadata.clone().unwrap_or_default(),
            "state": {"values": {"description": {"input": {"value": description}}}}
        }
    })
}

/// Click on the Edit button of a message.
#[must_use]
pub fn edit_click(user: &str, channel: &ChannelId, ts: &MessageTs) -> Value {
    json!({
        "type": "block_actions",
        "user": {"id": user},
        "trigger_id": format!("trigger-{user}-{ts}"),
        "channel": {"id": channel},
        "message": {"ts": ts},
        "actions": [{"action_id": "edit-message", "value": "clicked", "type": "button"}]
    })
}

/// Click on the Delete button of an open edit modal.
///
/// `private_metadata` overrides the modal's metadata when given, to model a
/// tampered or corrupted view.
///
/// # Panics
///
/// Panics if the modal has no Delete button.
#[must_use]
pub fn delete_click(modal: &OpenedModal, user: &str, private_metadata: Option<&str>) -> Value {
    let (block_id, value) = modal
        .view
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::Section {
                block_id,
                accessory: Some(Accessory::Button { action_id, value, .. }),
                ..
            } if action_id == "delete-message" => Some((block_id.clone(), value.clone())),
            _ => None,
        })
        .unwrap_or_else(|| panic!("modal has no delete button"));

    json!({
        "type": "block_actions",
        "user": {"id": user},
        "trigger_id": format!("trigger-delete-{user}"),
        "view": {
            "id": modal.view_id,
            "callback_id": modal.view.callback_id,
            "private_metadata": private_metadata
                .map(ToString::to_string)
                .or_else(|| modal.view.private_metadata.clone())
                .unwrap_or_default(),
        },
        "actions": [{"action_id": "delete-message", "block_id": block_id, "value": value, "type": "button"}]
    })
}

/// Description prefilled in an edit modal's input.
#[must_use]
pub fn prefilled_description(view: &View) -> Option<String> {
    view.blocks.iter().find_map(|block| match block {
        Block::Input {
            element: InputElement::PlainTextInput { initial_value, .. },
            ..
        } => initial_value.clone(),
        _ => None,
    })
}
