//! Pext contract: the message vocabulary between a launcher host and its
//! modules.
//!
//! A module drives the host by sending [`Action`]s: it fills the entry list,
//! asks questions, sets headers and context menus. The host answers with
//! [`Notification`]s when the user picks something or answers a prompt.
//! This crate provides:
//! - The closed, stably numbered [`ActionKind`] set with per-kind arity and
//!   the API version that introduced it
//! - Validated record types: [`Entry`], [`EntryType`], [`Selection`],
//!   [`ModuleGlobal`] and the module-owned [`Opaque`] value
//! - The positional `[tag, args...]` JSON wire format
//! - A reference host reducer ([`HostState`], [`apply_action`],
//!   [`handle_event`]) that applies the contract's display rules
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Layer (host/)                                 │  ← Reference host
//! │  - Action / event reducer                           │
//! │  - Prompt queue, history, notices                   │
//! │  - Header / info / option resolution                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Protocol Layer (protocol/)                         │  ← Message vocabulary
//! │  - ActionKind table and versions                    │
//! │  - Action / Notification types                      │
//! │  - JSON wire codec                                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Records
//! │  - Entry, EntryType, Selection, ModuleGlobal        │
//! │  - Opaque module values                             │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber fmt output                    │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Records exchanged between module and host, and errors
//! - [`protocol`]: Actions, notifications, versions and the wire format
//! - [`host`]: Reference host state and reducer
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! A host reads its settings from a string map (as handed over by its own
//! configuration system) or from a TOML file:
//!
//! ```toml
//! trace_level = "debug"
//! log_file = "/tmp/pext.log"
//! malformed_policy = "surface"
//! ```
//!
//! # Examples
//!
//! ## Module side
//!
//! ```rust
//! use pext_contract::{Action, Entry, EntryType};
//!
//! let message = Action::add_entry(
//!     Entry::new("Copy API token")
//!         .with_type(EntryType::Copyable)
//!         .with_copyname("s3cr3t"),
//! )
//! .to_wire();
//!
//! assert_eq!(message[0], 3);
//! assert_eq!(message[1]["type"], "copyable");
//! ```
//!
//! ## Host side
//!
//! ```rust
//! use pext_contract::{handle_event, initialize, receive, Config, Effect, HostEvent};
//!
//! let mut state = initialize(&Config::default());
//! receive(&mut state, r#"[3, {"name": "Audio settings"}]"#);
//!
//! let (redraw, effects) = handle_event(&mut state, &HostEvent::Select { index: 0 })?;
//! assert!(redraw);
//! assert!(matches!(effects[0], Effect::Notify(_)));
//! # Ok::<(), pext_contract::PextError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Stable numbering
//!
//! Action tags are part of the wire format. New kinds are appended with the
//! next free tag and never renumber existing ones. [`ApiVersion::supports`]
//! lets a module check whether a host understands a kind before sending it.
//!
//! ## Opaque module data
//!
//! `module_internal`, prompt identifiers and selection options are the
//! module's own values. The host stores and echoes them back without reading
//! them.
//!
//! ## Side-effect free reducer
//!
//! The host reducer only mutates [`HostState`] and returns [`Effect`]s. The
//! embedding application performs them, which keeps the reducer testable.

#![allow(clippy::multiple_crate_versions)]

pub mod domain;
pub mod host;
pub mod observability;
pub mod protocol;

pub use domain::{Entry, EntryType, ModuleGlobal, Opaque, PextError, Result, Selection};
pub use host::{
    apply_action, handle_event, receive, Effect, HostEvent, HostState, MalformedPolicy, Notice,
    NoticeLevel, Prompt,
};
pub use protocol::{Action, ActionKind, ApiVersion, Notification, Response, API_VERSION};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Host configuration.
///
/// # Example
///
/// ```toml
/// trace_level = "pext_contract=debug"
/// log_file = "/var/log/pext/host.log"
/// malformed_policy = "ignore"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,

    /// What to do with module messages that cannot be decoded.
    /// Default: [`MalformedPolicy::Ignore`]
    pub malformed_policy: MalformedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            log_file: None,
            malformed_policy: MalformedPolicy::Ignore,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `trace_level`: String → `Option<String>` (empty means unset)
    /// - `log_file`: String → `Option<PathBuf>` (empty means unset)
    /// - `malformed_policy`: `ignore` / `surface`, case-insensitive (falls
    ///   back to `ignore`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pext_contract::{Config, MalformedPolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("malformed_policy".to_string(), "surface".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.malformed_policy, MalformedPolicy::Surface);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let malformed_policy = config
            .get("malformed_policy")
            .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
                "ignore" => Some(MalformedPolicy::Ignore),
                "surface" => Some(MalformedPolicy::Surface),
                _ => None,
            })
            .unwrap_or_default();

        Self {
            trace_level: non_empty("trace_level"),
            log_file: non_empty("log_file").map(PathBuf::from),
            malformed_policy,
        }
    }

    /// Loads configuration from a TOML file. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// - [`PextError::Io`] if the file cannot be read
    /// - [`PextError::Config`] if the TOML is invalid or a value has the
    ///   wrong type
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| PextError::Config(format!("failed to parse config TOML: {e}")))
    }
}

/// Creates the host state for one module.
///
/// Tracing is not installed here. Call
/// [`observability::init_tracing`] once per process for that.
///
/// # Example
///
/// ```rust
/// use pext_contract::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.entries.is_empty());
/// assert!(state.history.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> HostState {
    tracing::debug!(
        api_version = %API_VERSION,
        malformed_policy = ?config.malformed_policy,
        "initializing module host state"
    );

    HostState::new(config)
}
