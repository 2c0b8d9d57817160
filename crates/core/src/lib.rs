//! Editable Request Core - Shared types library.
//!
//! This crate provides the types used by every Editable Request component:
//! - `app` - Slack interactivity service
//! - `cli` - Manifest generation and configuration checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype Slack IDs, request metadata, edit sessions and step outcomes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
