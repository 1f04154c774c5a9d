//! Reducer applying module actions and user events to [`HostState`].
//!
//! The host runs two inputs through the same state:
//!
//! ```text
//! Module ── Action ──▶ apply_action ──┐
//!                                      ├──▶ HostState ──▶ Vec<Effect>
//! User ──── HostEvent ─▶ handle_event ┘
//! ```
//!
//! Neither function performs side effects. They return [`Effect`]s, and the
//! embedding application carries them out: it delivers notifications to the
//! module, writes the clipboard, hides the window or unloads the module.

use super::state::{HostState, MalformedPolicy, Notice, Prompt};
use crate::domain::error::{PextError, Result};
use crate::domain::{EntryType, Selection};
use crate::protocol::{Action, Notification, Response};

/// A side effect for the embedding application to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver a notification to the module.
    Notify(Notification),
    /// Put text on the clipboard.
    CopyToClipboard(String),
    /// Hide the launcher window.
    CloseWindow,
    /// Stop the module after a critical error.
    UnloadModule { message: String },
}

/// User input the host forwards to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Activates the entry at `index` in [`HostState::entries`].
    Select { index: usize },
    /// Picks a context-menu option of the entry at `index`, or of the global
    /// menu when `index` is `None`.
    SelectOption { index: Option<usize>, option: String },
    /// Goes back one step in the navigation history.
    GoUp,
    /// Yes/no answer to the pending question.
    Answer(bool),
    /// Text submitted to the pending input prompt.
    Submit(String),
    /// The pending prompt was closed without an answer.
    Dismiss,
}

/// Applies one module action and returns the effects it causes.
///
/// Actions from an unloaded module are dropped.
///
/// # Example
///
/// ```rust
/// use pext_contract::{apply_action, Action, Entry, HostState};
///
/// let mut state = HostState::default();
/// let effects = apply_action(&mut state, Action::add_entry(Entry::new("Audio settings")));
/// assert!(effects.is_empty());
/// assert_eq!(state.entries[0].name(), "Audio settings");
/// ```
pub fn apply_action(state: &mut HostState, action: Action) -> Vec<Effect> {
    let kind = action.kind();
    let _span = tracing::debug_span!("apply_action", kind = %kind).entered();

    if state.unloaded {
        tracing::debug!("module unloaded, dropping action");
        return vec![];
    }

    match action {
        Action::CriticalError { message } => {
            tracing::error!(message = %message, "module reported critical error");
            state.push_notice(Notice::error(message.clone()));
            state.unloaded = true;
            state.prompts.clear();
            vec![Effect::UnloadModule { message }]
        }
        Action::AddMessage { message } => {
            state.push_notice(Notice::message(message));
            vec![]
        }
        Action::AddError { message } => {
            tracing::debug!(message = %message, "module reported error");
            state.push_notice(Notice::error(message));
            vec![]
        }
        Action::AddEntry { entry } => {
            state.entries.push(entry);
            vec![]
        }
        Action::PrependEntry { entry } => {
            state.entries.insert(0, entry);
            vec![]
        }
        Action::RemoveEntry { entry } => {
            if let Some(position) = state.entries.iter().position(|e| *e == entry) {
                state.entries.remove(position);
            } else {
                tracing::debug!(name = %entry.name(), "remove_entry matched nothing");
            }
            vec![]
        }
        Action::ClearEntries => {
            state.entries.clear();
            vec![]
        }
        Action::SetHeader { header } => {
            state.header = header;
            vec![]
        }
        Action::SetFilter { filter } => {
            state.filter = filter;
            vec![]
        }
        Action::AskQuestionDefaultYes { question, identifier }
        | Action::AskQuestionDefaultNo { question, identifier } => {
            state.prompts.push_back(Prompt {
                kind,
                text: question,
                prefill: None,
                identifier,
            });
            tracing::debug!(pending = state.prompts.len(), "question queued");
            vec![]
        }
        Action::AskInput { text, prefill, identifier }
        | Action::AskInputPassword { text, prefill, identifier }
        | Action::AskInputMultiLine { text, prefill, identifier } => {
            state.prompts.push_back(Prompt {
                kind,
                text,
                prefill: Some(prefill),
                identifier,
            });
            tracing::debug!(pending = state.prompts.len(), "input prompt queued");
            vec![]
        }
        Action::CopyToClipboard { text } => vec![Effect::CopyToClipboard(text)],
        Action::SetSelection { list } => {
            tracing::debug!(depth = list.len(), "selection replaced by module");
            state.history = list;
            state.reset_screen();
            vec![selection_made(state)]
        }
        Action::Close => close(state),
        Action::SetBaseInfo { info } => {
            state.global.info_html = info;
            vec![]
        }
        Action::SetBaseContext { options } => {
            state.global.options = options;
            vec![]
        }
    }
}

/// Processes one user event and returns whether a redraw is needed plus the
/// effects to carry out.
///
/// # Errors
///
/// - [`PextError::NoPendingPrompt`] for `Answer`, `Submit` or `Dismiss` with
///   no prompt open
/// - [`PextError::PromptMismatch`] when the response kind does not fit the
///   pending prompt (e.g. `Submit` to a yes/no question); the prompt stays
///   pending
pub fn handle_event(state: &mut HostState, event: &HostEvent) -> Result<(bool, Vec<Effect>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        HostEvent::Select { index } => {
            let Some(entry) = state.entries.get(*index).cloned() else {
                tracing::debug!(index, "no entry at index");
                return Ok((false, vec![]));
            };

            match entry.entry_type() {
                EntryType::Copyable => {
                    tracing::debug!(name = %entry.name(), "copying entry");
                    Ok((false, vec![Effect::CopyToClipboard(entry.copy_text().to_string()), Effect::CloseWindow]))
                }
                EntryType::Entry => {
                    tracing::debug!(name = %entry.name(), depth = state.history.len() + 1, "entry selected");
                    state.history.push(Selection::new(entry));
                    state.reset_screen();
                    Ok((true, vec![selection_made(state)]))
                }
            }
        }
        HostEvent::SelectOption { index, option } => {
            let step = match index {
                None => state
                    .global
                    .options
                    .contains(option)
                    .then(|| Selection::without_entry().with_option(option.as_str())),
                Some(index) => state
                    .entries
                    .get(*index)
                    .filter(|entry| entry.options().contains(option))
                    .map(|entry| Selection::new(entry.clone()).with_option(option.as_str())),
            };

            let Some(step) = step else {
                tracing::debug!(option = %option, index = ?index, "option not offered, ignoring");
                return Ok((false, vec![]));
            };

            state.history.push(step);
            state.reset_screen();
            Ok((true, vec![selection_made(state)]))
        }
        HostEvent::GoUp => {
            if state.history.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.reset_screen();
            Ok((true, vec![selection_made(state)]))
        }
        HostEvent::Answer(yes) => respond(state, Response::Answer(*yes)),
        HostEvent::Submit(text) => respond(state, Response::Text(text.clone())),
        HostEvent::Dismiss => respond(state, Response::Cancelled),
    }
}

/// Decodes one wire message from a module and applies it.
///
/// Messages that fail to decode are logged and dropped. Under
/// [`MalformedPolicy::Surface`] they also leave an error notice for the user.
/// This function never fails.
///
/// # Example
///
/// ```rust
/// use pext_contract::{receive, HostState};
///
/// let mut state = HostState::default();
/// receive(&mut state, r#"[3, {"name": "Audio settings"}]"#);
/// receive(&mut state, r#"[250, "from the future"]"#);
/// assert_eq!(state.entries.len(), 1);
/// ```
pub fn receive(state: &mut HostState, message: &str) -> Vec<Effect> {
    match Action::from_wire_str(message) {
        Ok(action) => apply_action(state, action),
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed module message");
            if state.malformed_policy == MalformedPolicy::Surface {
                state.push_notice(Notice::error(format!("Module sent a message this host cannot handle: {e}")));
            }
            vec![]
        }
    }
}

fn respond(state: &mut HostState, response: Response) -> Result<(bool, Vec<Effect>)> {
    let prompt = state.prompts.front().ok_or(PextError::NoPendingPrompt)?;
    if !response.fits(prompt.kind) {
        return Err(PextError::PromptMismatch {
            prompt: prompt.kind.name(),
        });
    }

    let prompt = state.prompts.pop_front().ok_or(PextError::NoPendingPrompt)?;
    tracing::debug!(kind = %prompt.kind, remaining = state.prompts.len(), "prompt answered");

    Ok((
        true,
        vec![Effect::Notify(Notification::ProcessResponse {
            identifier: prompt.identifier,
            response,
        })],
    ))
}

/// Hides the window and forgets the navigation history. A module that had a
/// history is told it is back at the root.
fn close(state: &mut HostState) -> Vec<Effect> {
    let mut effects = vec![Effect::CloseWindow];
    if state.history.is_empty() {
        state.filter.clear();
    } else {
        state.history.clear();
        state.reset_screen();
        effects.push(selection_made(state));
    }
    effects
}

fn selection_made(state: &HostState) -> Effect {
    Effect::Notify(Notification::SelectionMade {
        selection: state.history.clone(),
    })
}
