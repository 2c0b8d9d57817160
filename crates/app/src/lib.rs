//! Editable request Slack app.
//!
//! A Slack workflow that posts a request submitted through a form, then lets
//! only the submitter edit or delete it. The request lives in the posted
//! message's metadata; the app itself is stateless.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`error`] - HTTP error mapping
//! - [`manifest`] - Slack app manifest generation
//! - [`routes`] - Webhook endpoints
//! - [`slack`] - Web API client and payload types
//! - [`state`] - Shared application state
//! - [`workflow`] - Workflow definition and step handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod manifest;
pub mod routes;
pub mod slack;
pub mod state;
pub mod workflow;
