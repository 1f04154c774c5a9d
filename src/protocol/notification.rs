//! Notifications the host sends back to a module.

use super::kind::ActionKind;
use crate::domain::{Opaque, Selection};
use serde::{Deserialize, Serialize};

/// The user's answer to a prompt opened by an `ask_*` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Response {
    /// Yes/no answer to an `ask_question_*` prompt.
    Answer(bool),
    /// Text typed into an `ask_input*` prompt.
    Text(String),
    /// The user closed the prompt without answering.
    Cancelled,
}

impl Response {
    /// Whether this response can answer a prompt of `kind`.
    #[must_use]
    pub const fn fits(&self, kind: ActionKind) -> bool {
        match self {
            Self::Answer(_) => matches!(
                kind,
                ActionKind::AskQuestionDefaultYes | ActionKind::AskQuestionDefaultNo
            ),
            Self::Text(_) => matches!(
                kind,
                ActionKind::AskInput | ActionKind::AskInputPassword | ActionKind::AskInputMultiLine
            ),
            Self::Cancelled => kind.is_prompt(),
        }
    }
}

/// A message from the host to a module.
///
/// # Examples
///
/// ```
/// use pext_contract::{Notification, Opaque, Response};
///
/// let note = Notification::ProcessResponse {
///     identifier: Opaque::from(0),
///     response: Response::Text("New name".into()),
/// };
/// let json = serde_json::to_value(&note)?;
/// assert_eq!(json["kind"], "process_response");
/// assert_eq!(json["response"]["value"], "New name");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Answer to an `ask_*` action, echoing its identifier unchanged.
    ProcessResponse { identifier: Opaque, response: Response },

    /// The navigation history changed. Carries the whole history, oldest first.
    SelectionMade { selection: Vec<Selection> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entry;

    #[test]
    fn responses_fit_their_prompts() {
        assert!(Response::Answer(true).fits(ActionKind::AskQuestionDefaultNo));
        assert!(!Response::Answer(true).fits(ActionKind::AskInput));
        assert!(Response::Text(String::new()).fits(ActionKind::AskInputPassword));
        assert!(!Response::Text(String::new()).fits(ActionKind::AskQuestionDefaultYes));
        assert!(Response::Cancelled.fits(ActionKind::AskInputMultiLine));
        assert!(!Response::Cancelled.fits(ActionKind::AddEntry));
    }

    #[test]
    fn selection_made_round_trips() {
        let note = Notification::SelectionMade {
            selection: vec![Selection::new(Entry::new("Settings")), Selection::default()],
        };
        let text = serde_json::to_string(&note).unwrap();
        assert!(text.starts_with(r#"{"kind":"selection_made""#));
        let back: Notification = serde_json::from_str(&text).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn cancelled_has_no_value() {
        let json = serde_json::to_value(Response::Cancelled).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "cancelled"}));
    }
}
