//! Error types for the module/host contract.
//!
//! This module defines the centralized error type [`PextError`] and a type alias
//! [`Result`] used throughout the crate. Errors fall into two families:
//!
//! - **Validation**: raised synchronously when a field receives a value outside
//!   its required kind (`Entry.type`, `Selection.entry`). Always recoverable by
//!   the module author.
//! - **Malformed messages**: raised while decoding a wire message whose tag or
//!   argument shape the running host does not understand. Hosts log these and
//!   carry on; they are never fatal.

use thiserror::Error;

/// The main error type for contract operations.
///
/// # Examples
///
/// ```
/// use pext_contract::{EntryType, PextError};
///
/// let err = EntryType::try_from(7u8).unwrap_err();
/// assert!(matches!(err, PextError::Validation { .. }));
/// assert_eq!(err.to_string(), "7 is not a valid EntryType");
/// ```
#[derive(Debug, Error)]
pub enum PextError {
    /// A field received a value that is not of its required kind.
    ///
    /// `value` is a rendering of the rejected value; `expected` names the kind
    /// the field accepts (e.g. `"EntryType"`).
    #[error("{value} is not a valid {expected}")]
    Validation {
        /// The rejected value, rendered for display.
        value: String,
        /// The kind the field accepts.
        expected: &'static str,
    },

    /// A wire message carried a tag no [`ActionKind`](crate::ActionKind) maps to.
    ///
    /// Usually means the module targets a newer API version than the host runs.
    #[error("unknown action tag {tag}")]
    UnknownAction {
        /// The numeric tag as received.
        tag: u64,
    },

    /// A wire message could not be decoded into an action.
    #[error("malformed {kind} message: {reason}")]
    MalformedMessage {
        /// Name of the action being decoded, or `"action"` when the tag itself
        /// could not be read.
        kind: &'static str,
        /// What was wrong with the message.
        reason: String,
    },

    /// A user response did not match the kind of the pending prompt.
    ///
    /// For example, free text submitted while a yes/no question is pending.
    #[error("response does not match pending {prompt} prompt")]
    PromptMismatch {
        /// Name of the action that opened the prompt.
        prompt: &'static str,
    },

    /// A user response arrived while no prompt was pending.
    #[error("no prompt is pending")]
    NoPendingPrompt,

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PextError {
    /// Builds a [`PextError::Validation`] from any displayable value.
    pub(crate) fn validation(value: impl std::fmt::Display, expected: &'static str) -> Self {
        Self::Validation {
            value: value.to_string(),
            expected,
        }
    }

    /// Builds a [`PextError::MalformedMessage`].
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            kind,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors a host should treat as a bad message rather
    /// than a bug in its own code.
    #[must_use]
    pub const fn is_malformed_message(&self) -> bool {
        matches!(
            self,
            Self::UnknownAction { .. }
                | Self::MalformedMessage { .. }
                | Self::Validation { .. }
                | Self::Json(_)
        )
    }
}

impl From<std::convert::Infallible> for PextError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// A specialized `Result` type for contract operations.
pub type Result<T> = std::result::Result<T, PextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_value_and_kind() {
        let err = PextError::validation("\"bogus\"", "EntryType");
        assert_eq!(err.to_string(), "\"bogus\" is not a valid EntryType");
    }

    #[test]
    fn malformed_classification() {
        assert!(PextError::UnknownAction { tag: 99 }.is_malformed_message());
        assert!(PextError::malformed("add_entry", "missing entry").is_malformed_message());
        assert!(!PextError::NoPendingPrompt.is_malformed_message());
        assert!(!PextError::Config("x".into()).is_malformed_message());
    }
}
