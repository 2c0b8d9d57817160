//! The slice of the Slack Web API used by the workflow.
//!
//! Workflow handlers are generic over [`SlackApi`] so they can run against
//! the real [`SlackClient`](super::SlackClient) or an in-memory double.

use std::future::Future;

use editable_request_core::{ChannelId, MessageTs, TriggerId, UserId, ViewId};

use super::error::SlackError;
use super::types::{HistoryMessage, MessageContent, RepliesQuery, View};

/// Slack Web API operations.
///
/// Every call is a single request/response. Implementations must not retry.
pub trait SlackApi: Send + Sync {
    /// `conversations.join` as the bot user.
    fn join_channel(
        &self,
        channel: &ChannelId,
    ) -> impl Future<Output = Result<(), SlackError>> + Send;

    /// `chat.postMessage`. Returns the new message's timestamp.
    fn post_message(
        &self,
        channel: &ChannelId,
        content: &MessageContent,
    ) -> impl Future<Output = Result<MessageTs, SlackError>> + Send;

    /// `conversations.replies`.
    fn fetch_replies(
        &self,
        query: &RepliesQuery,
    ) -> impl Future<Output = Result<Vec<HistoryMessage>, SlackError>> + Send;

    /// `chat.delete`.
    fn delete_message(
        &self,
        channel: &ChannelId,
        ts: &MessageTs,
    ) -> impl Future<Output = Result<(), SlackError>> + Send;

    /// `chat.update`. Overwrites text, blocks and metadata in place.
    fn update_message(
        &self,
        channel: &ChannelId,
        ts: &MessageTs,
        content: &MessageContent,
    ) -> impl Future<Output = Result<(), SlackError>> + Send;

    /// `views.open` using an interaction's trigger ID.
    fn open_view(
        &self,
        trigger_id: &TriggerId,
        view: &View,
    ) -> impl Future<Output = Result<ViewId, SlackError>> + Send;

    /// `views.update`.
    fn update_view(
        &self,
        view_id: &ViewId,
        view: &View,
    ) -> impl Future<Output = Result<(), SlackError>> + Send;

    /// `auth.test`. Returns the bot's own user ID.
    fn bot_user_id(&self) -> impl Future<Output = Result<UserId, SlackError>> + Send;
}
