//! Configuration checks.
//!
//! # Usage
//!
//! ```bash
//! # Validate environment configuration
//! editable-request-cli check-config
//!
//! # Also confirm the bot token with Slack (auth.test)
//! editable-request-cli check-config --verify-token
//! ```

use editable_request_app::config::{AppConfig, ConfigError};
use editable_request_app::slack::{SlackApi, SlackClient, SlackError};
use thiserror::Error;

/// Errors that can occur while checking configuration.
#[derive(Debug, Error)]
pub enum CheckConfigError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Slack rejected the bot token.
    #[error("Slack token check failed: {0}")]
    Slack(#[from] SlackError),
}

/// Load configuration and optionally verify the bot token.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the token is rejected.
pub async fn check(verify_token: bool) -> Result<(), CheckConfigError> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        addr = %config.socket_addr(),
        base_url = ?config.base_url,
        api_base = %config.slack.api_base,
        tls = config.tls.is_some(),
        sentry = config.sentry_dsn.is_some(),
        debug_mode = config.debug_mode,
        "Configuration loaded"
    );

    if verify_token {
        let slack = SlackClient::new(
            config.slack.bot_token,
            config.slack.signing_secret,
            config.slack.api_base,
        );
        let bot_user_id = slack.bot_user_id().await?;
        tracing::info!(bot_user_id = %bot_user_id, "Bot token accepted by Slack");
    }

    Ok(())
}
