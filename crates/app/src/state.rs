//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::slack::SlackClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The app keeps no request data of its own;
/// the state only holds the Slack client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    slack: SlackClient,
}

impl AppState {
    /// Create application state around a Slack client.
    #[must_use]
    pub fn new(slack: SlackClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { slack }),
        }
    }

    /// Create application state from configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(SlackClient::new(
            config.slack.bot_token.clone(),
            config.slack.signing_secret.clone(),
            config.slack.api_base.clone(),
        ))
    }

    /// Get a reference to the Slack client.
    #[must_use]
    pub fn slack(&self) -> &SlackClient {
        &self.inner.slack
    }
}
