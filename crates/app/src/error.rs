//! Unified error handling for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::slack::SlackError;

/// Application-level error type for webhook handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Slack API or payload error.
    #[error("Slack error: {0}")]
    Slack(#[from] SlackError),

    /// Request could not be authenticated as coming from Slack.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the failure is on Slack's side rather than the caller's.
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Slack(SlackError::Request(_) | SlackError::Response(_) | SlackError::Api(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Webhook request error"
            );
        } else {
            tracing::warn!(error = %self, "Rejected webhook request");
        }

        let status = match &self {
            Self::Slack(SlackError::InvalidSignature(_)) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Slack(SlackError::InvalidPayload(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Slack(_) => StatusCode::BAD_GATEWAY,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Slack(_) if self.is_server_error() => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}
