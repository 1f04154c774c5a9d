//! Per-module state kept by the host.
//!
//! [`HostState`] is the host's record of what one module has asked for: the
//! entry list, header, filter text, global defaults, navigation history,
//! pending prompts and notices. The reducer in [`super::handler`] mutates it.
//! Renderers read it through the resolution helpers, which apply the header
//! and info inheritance rules. Layout, highlighting and search are left to
//! the renderer.

use crate::domain::{Entry, ModuleGlobal, Opaque, Selection};
use crate::protocol::ActionKind;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of notices kept before the oldest are dropped.
pub const MAX_NOTICES: usize = 64;

/// What the host does with a message it cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log it and carry on.
    #[default]
    Ignore,
    /// Log it and also show the user an error notice.
    Surface,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Message,
    Error,
}

/// A message or error shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Message,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// A question or input request waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// The `ask_*` kind that opened the prompt.
    pub kind: ActionKind,
    /// The question or label shown to the user.
    pub text: String,
    /// Initial input text. Always `None` for yes/no questions.
    pub prefill: Option<String>,
    /// Echoed back unchanged in `process_response`.
    pub identifier: Opaque,
}

impl Prompt {
    /// The pre-selected answer of a yes/no question.
    #[must_use]
    pub const fn default_answer(&self) -> Option<bool> {
        match self.kind {
            ActionKind::AskQuestionDefaultYes => Some(true),
            ActionKind::AskQuestionDefaultNo => Some(false),
            _ => None,
        }
    }

    /// Whether the input should be masked.
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.kind == ActionKind::AskInputPassword
    }
}

/// The host's state for one module.
#[derive(Debug, Clone)]
pub struct HostState {
    /// Entries in module order.
    pub entries: Vec<Entry>,

    /// Header set through `set_header`. Entries in the history take precedence.
    pub header: Option<String>,

    /// Search bar text set through `set_filter`. Matching is up to the renderer.
    pub filter: String,

    /// Module-wide defaults from `set_base_info` / `set_base_context`.
    pub global: ModuleGlobal,

    /// Navigation history, oldest first.
    pub history: Vec<Selection>,

    /// Prompts waiting for an answer, answered front first.
    pub prompts: VecDeque<Prompt>,

    /// Messages and errors, oldest first, at most [`MAX_NOTICES`]. Drain with
    /// [`HostState::take_notices`] once shown.
    pub notices: VecDeque<Notice>,

    /// Set after `critical_error`. An unloaded module's actions are dropped.
    pub unloaded: bool,

    pub malformed_policy: MalformedPolicy,
}

impl Default for HostState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl HostState {
    /// Creates an empty state at the root screen.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            entries: vec![],
            header: None,
            filter: String::new(),
            global: ModuleGlobal::default(),
            history: vec![],
            prompts: VecDeque::new(),
            notices: VecDeque::new(),
            unloaded: false,
            malformed_policy: config.malformed_policy,
        }
    }

    /// Records a notice, dropping the oldest once [`MAX_NOTICES`] are held.
    pub fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_NOTICES {
            self.notices.pop_front();
            tracing::debug!(max = MAX_NOTICES, "notice queue full, dropped oldest");
        }
        self.notices.push_back(notice);
    }

    /// Removes and returns every queued notice, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Clears the entries and filter, ready for the module to fill the next
    /// screen.
    pub(crate) fn reset_screen(&mut self) {
        self.entries.clear();
        self.filter.clear();
    }

    /// The header to display.
    ///
    /// The newest history entry with a header wins, even an empty one, which
    /// blanks the header. Without one, the `set_header` text is used, then the
    /// global header.
    #[must_use]
    pub fn current_header(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .filter_map(Selection::entry)
            .find_map(Entry::header)
            .or(self.header.as_deref())
            .or(self.global.header.as_deref())
    }

    /// The info block to display: the newest history entry with non-empty
    /// info, else the global info.
    #[must_use]
    pub fn current_info(&self) -> &str {
        self.history
            .iter()
            .rev()
            .filter_map(Selection::entry)
            .map(Entry::info_html)
            .find(|info| !info.is_empty())
            .unwrap_or(self.global.info_html.as_str())
    }

    /// The header context menu: the newest history entry with options, else
    /// the global options.
    #[must_use]
    pub fn current_options(&self) -> &[String] {
        self.history
            .iter()
            .rev()
            .filter_map(Selection::entry)
            .map(Entry::options)
            .find(|options| !options.is_empty())
            .unwrap_or(self.global.options.as_slice())
    }

    /// The prompt the user should answer next.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.prompts.front()
    }
}
