//! Message vocabulary between modules and the host.
//!
//! - [`kind`]: the closed, stably numbered [`ActionKind`] set
//! - [`action`]: typed [`Action`] messages a module sends
//! - [`wire`]: the positional `[tag, args...]` JSON encoding
//! - [`notification`]: [`Notification`]s the host sends back
//! - [`version`]: [`ApiVersion`] and feature detection
//!
//! # Message flow
//!
//! ```text
//! Module ── Action ([tag, args...]) ──▶ Host
//!        ◀── Notification ────────────
//!            process_response / selection_made
//! ```
//!
//! How messages travel (queue, pipe, socket) is up to the embedding
//! application.

pub mod action;
pub mod kind;
pub mod notification;
pub mod version;
pub mod wire;

pub use action::Action;
pub use kind::ActionKind;
pub use notification::{Notification, Response};
pub use version::{ApiVersion, API_VERSION};
