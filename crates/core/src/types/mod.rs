//! Core types for the editable request app.
//!
//! This module provides type-safe wrappers for Slack identifiers and the
//! records threaded through Slack message and modal metadata.

pub mod id;
pub mod outcome;
pub mod request;

pub use id::*;
pub use outcome::StepOutcome;
pub use request::{EditSession, EditSessionError, MessageMetadata, REQUEST_EVENT_TYPE, Request};
