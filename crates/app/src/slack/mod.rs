//! Slack platform integration.
//!
//! This module provides:
//! - [`SlackApi`], the Web API surface the workflow depends on
//! - [`SlackClient`], its HTTP implementation
//! - Block Kit, view and interaction payload types
//! - Webhook signature verification
//!
//! # Flow
//!
//! 1. Slack delivers a slash command or interaction to the webhook routes
//! 2. The route verifies the signature and parses the payload
//! 3. A workflow handler runs a short sequence of Web API calls
//! 4. The route acknowledges Slack with `200 OK`

mod api;
mod client;
mod error;
mod types;

pub use api::SlackApi;
pub use client::{SLACK_API_BASE, SlackClient};
pub use error::SlackError;
pub use types::{
    Accessory, ApiEnvelope, AuthTestResponse, Block, BlockActionsPayload, ButtonStyle,
    EmptyResponse, HistoryMessage, InputElement, InputValue, InteractionAction,
    InteractionChannel, InteractionMessage, InteractionPayload, InteractionUser, InteractionView,
    MessageContent, OpenedView, PlainText, PostMessageResponse, RepliesQuery, RepliesResponse,
    SlashCommand, Text, View, ViewResponse, ViewState, ViewSubmissionPayload,
};
