//! Slack Web API client.
//!
//! Provides the calls the workflow needs (join, post, replies, delete,
//! update, views, auth) and verifies request signatures on incoming
//! webhooks.

use editable_request_core::{ChannelId, MessageTs, TriggerId, UserId, ViewId};
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::{debug, error, instrument};

use super::api::SlackApi;
use super::error::SlackError;
use super::types::{
    ApiEnvelope, AuthTestResponse, EmptyResponse, HistoryMessage, MessageContent,
    PostMessageResponse, RepliesQuery, RepliesResponse, View, ViewResponse,
};

/// Default Slack Web API base URL.
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Maximum accepted age of a signed request, in seconds.
const SIGNATURE_MAX_AGE_SECS: u64 = 300;

/// Slack API client.
#[derive(Clone)]
pub struct SlackClient {
    /// HTTP client.
    client: Client,
    /// Bot token for authentication.
    bot_token: SecretString,
    /// Signing secret for verifying webhooks.
    signing_secret: SecretString,
    /// Web API base URL (overridable for testing).
    api_base: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("bot_token", &"[REDACTED]")
            .field("signing_secret", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new Slack client.
    #[must_use]
    pub fn new(bot_token: SecretString, signing_secret: SecretString, api_base: String) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            signing_secret,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Get the Web API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Call a Web API method with a JSON body.
    async fn call_json<B, T>(&self, method: &str, body: &B) -> Result<T, SlackError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(self.bot_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| SlackError::Request(e.to_string()))?;

        Self::unwrap_envelope(method, response).await
    }

    /// Call a Web API method with a form-encoded body.
    ///
    /// Read methods such as `conversations.replies` do not accept JSON.
    async fn call_form<B, T>(&self, method: &str, body: &B) -> Result<T, SlackError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(self.bot_token.expose_secret())
            .form(body)
            .send()
            .await
            .map_err(|e| SlackError::Request(e.to_string()))?;

        Self::unwrap_envelope(method, response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, SlackError> {
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| SlackError::Response(e.to_string()))?;

        if !envelope.ok {
            error!(method, error = ?envelope.error, "Slack API error");
            return Err(SlackError::Api(
                envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        Ok(envelope.data)
    }

    /// Verify a Slack webhook signature.
    ///
    /// This implements Slack's signature verification:
    /// <https://api.slack.com/authentication/verifying-requests-from-slack>
    ///
    /// # Arguments
    ///
    /// * `timestamp` - The `X-Slack-Request-Timestamp` header value
    /// * `body` - The raw request body
    /// * `signature` - The `X-Slack-Signature` header value
    ///
    /// # Errors
    ///
    /// Returns error if signature verification fails.
    #[instrument(skip(self, body, signature))]
    pub fn verify_signature(
        &self,
        timestamp: &str,
        body: &str,
        signature: &str,
    ) -> Result<(), SlackError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| SlackError::InvalidSignature("Invalid timestamp".to_string()))?;

        let now_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| SlackError::InvalidSignature(e.to_string()))?
            .as_secs();

        let now = i64::try_from(now_secs)
            .map_err(|_| SlackError::InvalidSignature("System time overflow".to_string()))?;

        if now.abs_diff(ts) > SIGNATURE_MAX_AGE_SECS {
            return Err(SlackError::InvalidSignature(
                "Request timestamp too old".to_string(),
            ));
        }

        let sig_basestring = format!("v0:{timestamp}:{body}");

        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.signing_secret.expose_secret().as_bytes())
                .map_err(|e| SlackError::InvalidSignature(e.to_string()))?;

        mac.update(sig_basestring.as_bytes());

        let expected = format!("v0={}", hex::encode(mac.finalize().into_bytes()));

        if !constant_time_compare(&expected, signature) {
            return Err(SlackError::InvalidSignature(
                "Signature mismatch".to_string(),
            ));
        }

        debug!("Slack signature verified");

        Ok(())
    }
}

impl SlackApi for SlackClient {
    #[instrument(skip(self), fields(channel = %channel))]
    async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        let _: EmptyResponse = self
            .call_json("conversations.join", &serde_json::json!({ "channel": channel }))
            .await?;

        debug!("Joined channel");
        Ok(())
    }

    #[instrument(skip(self, content), fields(channel = %channel))]
    async fn post_message(
        &self,
        channel: &ChannelId,
        content: &MessageContent,
    ) -> Result<MessageTs, SlackError> {
        #[derive(Serialize)]
        struct PostMessage<'a> {
            channel: &'a ChannelId,
            #[serde(flatten)]
            content: &'a MessageContent,
        }

        let result: PostMessageResponse = self
            .call_json("chat.postMessage", &PostMessage { channel, content })
            .await?;

        let ts = result
            .ts
            .ok_or_else(|| SlackError::Response("chat.postMessage returned no ts".to_string()))?;

        debug!(ts = %ts, "Message posted to Slack");
        Ok(ts)
    }

    #[instrument(skip(self), fields(channel = %query.channel, ts = %query.ts))]
    async fn fetch_replies(&self, query: &RepliesQuery) -> Result<Vec<HistoryMessage>, SlackError> {
        let result: RepliesResponse = self.call_form("conversations.replies", query).await?;

        debug!(count = result.messages.len(), "Fetched replies");
        Ok(result.messages)
    }

    #[instrument(skip(self), fields(channel = %channel, ts = %ts))]
    async fn delete_message(&self, channel: &ChannelId, ts: &MessageTs) -> Result<(), SlackError> {
        let _: EmptyResponse = self
            .call_json(
                "chat.delete",
                &serde_json::json!({ "channel": channel, "ts": ts }),
            )
            .await?;

        debug!("Message deleted from Slack");
        Ok(())
    }

    #[instrument(skip(self, content), fields(channel = %channel, ts = %ts))]
    async fn update_message(
        &self,
        channel: &ChannelId,
        ts: &MessageTs,
        content: &MessageContent,
    ) -> Result<(), SlackError> {
        #[derive(Serialize)]
        struct UpdateMessage<'a> {
            channel: &'a ChannelId,
            ts: &'a MessageTs,
            #[serde(flatten)]
            content: &'a MessageContent,
        }

        let _: EmptyResponse = self
            .call_json("chat.update", &UpdateMessage { channel, ts, content })
            .await?;

        debug!("Message updated in Slack");
        Ok(())
    }

    #[instrument(skip(self, view), fields(callback_id = %view.callback_id))]
    async fn open_view(&self, trigger_id: &TriggerId, view: &View) -> Result<ViewId, SlackError> {
        let result: ViewResponse = self
            .call_json(
                "views.open",
                &serde_json::json!({ "trigger_id": trigger_id, "view": view }),
            )
            .await?;

        let view_id = result
            .view
            .map(|v| v.id)
            .ok_or_else(|| SlackError::Response("views.open returned no view".to_string()))?;

        debug!(view_id = %view_id, "Modal opened");
        Ok(view_id)
    }

    #[instrument(skip(self, view), fields(view_id = %view_id, callback_id = %view.callback_id))]
    async fn update_view(&self, view_id: &ViewId, view: &View) -> Result<(), SlackError> {
        let _: ViewResponse = self
            .call_json(
                "views.update",
                &serde_json::json!({ "view_id": view_id, "view": view }),
            )
            .await?;

        debug!("Modal updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn bot_user_id(&self) -> Result<UserId, SlackError> {
        let result: AuthTestResponse = self
            .call_json("auth.test", &serde_json::json!({}))
            .await?;

        result
            .user_id
            .ok_or_else(|| SlackError::Response("auth.test returned no user_id".to_string()))
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
