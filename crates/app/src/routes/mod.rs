//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Slack webhooks (signature-verified)
//! POST /slack/commands         - Slash commands (workflow trigger)
//! POST /slack/interactions     - Button clicks and modal submissions
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod slack;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(slack::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Slack.
async fn health() -> &'static str {
    "ok"
}
