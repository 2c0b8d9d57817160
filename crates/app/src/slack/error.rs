//! Slack-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with Slack.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP request failed.
    #[error("Slack request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Slack response error: {0}")]
    Response(String),

    /// Slack API returned an error code (e.g. `channel_not_found`).
    #[error("{0}")]
    Api(String),

    /// Invalid webhook signature.
    #[error("Invalid Slack signature: {0}")]
    InvalidSignature(String),

    /// Failed to parse interaction payload.
    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(String),
}

impl SlackError {
    /// The Slack error code, if Slack itself rejected the call.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(code) => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_bare_code() {
        let err = SlackError::Api("channel_not_found".to_string());
        assert_eq!(err.to_string(), "channel_not_found");
        assert_eq!(err.api_code(), Some("channel_not_found"));
    }

    #[test]
    fn test_transport_error_has_no_api_code() {
        let err = SlackError::Request("connection reset".to_string());
        assert!(err.api_code().is_none());
    }
}
