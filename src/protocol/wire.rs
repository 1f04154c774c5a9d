//! Positional JSON encoding of actions.
//!
//! An action travels as a JSON array: the numeric tag first, then the
//! arguments in their documented order.
//!
//! ```text
//! [3, {"name": "Audio settings", "type": "entry"}]       add_entry
//! [11, "Please choose a new name", "Example name", 0]    ask_input
//! [7]                                                    set_header (remove)
//! ```
//!
//! Decoding never panics. Unknown tags become [`PextError::UnknownAction`] and
//! wrong shapes become [`PextError::MalformedMessage`], so a host can log the
//! message and keep running when module and host versions differ.

use super::action::Action;
use super::kind::ActionKind;
use crate::domain::error::{PextError, Result};
use crate::domain::{Entry, Opaque, Selection};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

impl Action {
    /// Encodes the action as `[tag, args...]`.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let mut message = vec![Value::from(self.kind().tag())];
        match self {
            Self::CriticalError { message: text }
            | Self::AddMessage { message: text }
            | Self::AddError { message: text }
            | Self::SetFilter { filter: text }
            | Self::CopyToClipboard { text }
            | Self::SetBaseInfo { info: text } => message.push(Value::from(text.as_str())),
            Self::AddEntry { entry } | Self::PrependEntry { entry } | Self::RemoveEntry { entry } => {
                message.push(to_value(entry));
            }
            Self::ClearEntries | Self::Close => {}
            Self::SetHeader { header } => {
                if let Some(header) = header {
                    message.push(Value::from(header.as_str()));
                }
            }
            Self::AskQuestionDefaultYes { question, identifier }
            | Self::AskQuestionDefaultNo { question, identifier } => {
                message.push(Value::from(question.as_str()));
                message.push(identifier.as_value().clone());
            }
            Self::AskInput { text, prefill, identifier }
            | Self::AskInputPassword { text, prefill, identifier }
            | Self::AskInputMultiLine { text, prefill, identifier } => {
                message.push(Value::from(text.as_str()));
                message.push(Value::from(prefill.as_str()));
                message.push(identifier.as_value().clone());
            }
            Self::SetSelection { list } => message.push(Value::Array(list.iter().map(to_value).collect())),
            Self::SetBaseContext { options } => message.push(Value::from(options.clone())),
        }
        Value::Array(message)
    }

    /// Decodes a `[tag, args...]` message.
    ///
    /// # Errors
    ///
    /// - [`PextError::UnknownAction`] when the tag is not a known kind
    /// - [`PextError::MalformedMessage`] when the message is not an array, the
    ///   tag is not an unsigned integer, or the arguments have the wrong count
    ///   or shape
    /// - [`PextError::Validation`] when an entry carries an invalid type
    pub fn from_wire(message: &Value) -> Result<Self> {
        let Some((tag, args)) = message.as_array().and_then(|m| m.split_first()) else {
            return Err(PextError::malformed("action", "expected a non-empty array"));
        };
        let tag = tag
            .as_u64()
            .ok_or_else(|| PextError::malformed("action", format!("tag {tag} is not an unsigned integer")))?;
        let kind = ActionKind::try_from(tag)?;

        let arity = kind.arity();
        if !arity.contains(&args.len()) {
            return Err(PextError::malformed(
                kind.name(),
                format!(
                    "expected {}..={} arguments, got {}",
                    arity.start(),
                    arity.end(),
                    args.len()
                ),
            ));
        }

        let args = Args { kind, args };
        let action = match kind {
            ActionKind::CriticalError => Self::CriticalError { message: args.text(0, "message")? },
            ActionKind::AddMessage => Self::AddMessage { message: args.text(0, "message")? },
            ActionKind::AddError => Self::AddError { message: args.text(0, "message")? },
            ActionKind::AddEntry => Self::AddEntry { entry: args.entry(0)? },
            ActionKind::PrependEntry => Self::PrependEntry { entry: args.entry(0)? },
            ActionKind::RemoveEntry => Self::RemoveEntry { entry: args.entry(0)? },
            ActionKind::ClearEntries => Self::ClearEntries,
            ActionKind::SetHeader => Self::SetHeader { header: args.optional_text(0, "header")? },
            ActionKind::SetFilter => Self::SetFilter { filter: args.text(0, "filter")? },
            ActionKind::AskQuestionDefaultYes => Self::AskQuestionDefaultYes {
                question: args.text(0, "question")?,
                identifier: args.identifier(1),
            },
            ActionKind::AskQuestionDefaultNo => Self::AskQuestionDefaultNo {
                question: args.text(0, "question")?,
                identifier: args.identifier(1),
            },
            ActionKind::AskInput => Self::AskInput {
                text: args.text(0, "text")?,
                prefill: args.text(1, "prefill")?,
                identifier: args.identifier(2),
            },
            ActionKind::AskInputPassword => Self::AskInputPassword {
                text: args.text(0, "text")?,
                prefill: args.text(1, "prefill")?,
                identifier: args.identifier(2),
            },
            ActionKind::AskInputMultiLine => Self::AskInputMultiLine {
                text: args.text(0, "text")?,
                prefill: args.text(1, "prefill")?,
                identifier: args.identifier(2),
            },
            ActionKind::CopyToClipboard => Self::CopyToClipboard { text: args.text(0, "text")? },
            ActionKind::SetSelection => Self::SetSelection { list: args.selections(0)? },
            ActionKind::Close => Self::Close,
            ActionKind::SetBaseInfo => Self::SetBaseInfo { info: args.text(0, "info")? },
            ActionKind::SetBaseContext => Self::SetBaseContext { options: args.texts(0, "options")? },
        };

        tracing::trace!(kind = %kind, "decoded action");
        Ok(action)
    }

    /// Decodes a message from its JSON text.
    ///
    /// # Errors
    ///
    /// As [`Action::from_wire`], plus [`PextError::Json`] for invalid JSON.
    pub fn from_wire_str(message: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(message)?;
        Self::from_wire(&value)
    }
}

/// Positional argument reader for one message.
struct Args<'a> {
    kind: ActionKind,
    args: &'a [Value],
}

impl Args<'_> {
    fn text(&self, index: usize, name: &str) -> Result<String> {
        match self.args.get(index) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.malformed(format!("{name} must be text, got {other}"))),
            None => Err(self.malformed(format!("missing {name}"))),
        }
    }

    fn optional_text(&self, index: usize, name: &str) -> Result<Option<String>> {
        match self.args.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.text(index, name).map(Some),
        }
    }

    fn texts(&self, index: usize, name: &str) -> Result<Vec<String>> {
        let items = self
            .args
            .get(index)
            .and_then(Value::as_array)
            .ok_or_else(|| self.malformed(format!("{name} must be a list of text")))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(String::from)
                    .ok_or_else(|| self.malformed(format!("{name} must be a list of text, got {item}")))
            })
            .collect()
    }

    fn entry(&self, index: usize) -> Result<Entry> {
        let raw = self
            .args
            .get(index)
            .ok_or_else(|| self.malformed("missing entry"))?;
        Entry::from_value(raw).map_err(|e| self.reclassify(e))
    }

    /// Items may be selection objects or, as older modules sent, bare entries.
    fn selections(&self, index: usize) -> Result<Vec<Selection>> {
        let items = self
            .args
            .get(index)
            .and_then(Value::as_array)
            .ok_or_else(|| self.malformed("list must be a list of selections"))?;
        items
            .iter()
            .map(|item| self.selection(item).map_err(|e| self.reclassify(e)))
            .collect()
    }

    fn selection(&self, item: &Value) -> Result<Selection> {
        let Some(fields) = item.as_object() else {
            return Err(self.malformed(format!("{item} is not a selection")));
        };
        if fields.contains_key("name") {
            return Entry::from_value(item).map(Selection::new);
        }

        let mut selection = match fields.get("entry") {
            Some(raw) => Selection::new(Entry::from_value(raw)?),
            None => Selection::without_entry(),
        };
        // A present option is kept even when it is null.
        selection.set_option(fields.get("option").cloned().map(Opaque::from_value));
        Ok(selection)
    }

    fn identifier(&self, index: usize) -> Opaque {
        self.args
            .get(index)
            .cloned()
            .map_or_else(Opaque::null, Opaque::from_value)
    }

    fn malformed(&self, reason: impl Into<String>) -> PextError {
        PextError::malformed(self.kind.name(), reason)
    }

    /// Entry type violations keep their validation error; anything else that
    /// is not an entry is a malformed argument.
    fn reclassify(&self, error: PextError) -> PextError {
        match error {
            PextError::Validation { expected: "Entry", value } => {
                self.malformed(format!("{value} is not an entry"))
            }
            other => other,
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    // Contract records are plain strings, lists and JSON blobs; they always
    // serialize.
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryType;
    use serde_json::json;

    fn one_of_each() -> Vec<Action> {
        let entry = Entry::new("Track")
            .with_type(EntryType::Copyable)
            .with_options(["Queue"])
            .with_module_internal(Opaque::from_value(json!({"id": 7})));
        vec![
            Action::critical_error("boom"),
            Action::add_message("We did a thing"),
            Action::add_error("We did a thing, but it went wrong"),
            Action::add_entry(entry.clone()),
            Action::prepend_entry(Entry::new("volume")),
            Action::remove_entry(entry.clone()),
            Action::ClearEntries,
            Action::set_header(Some("Weather for New York")),
            Action::set_header(None::<String>),
            Action::set_filter("new york"),
            Action::ask_question_default_yes("Continue?", 0),
            Action::ask_question_default_no("Delete?", "delete-42"),
            Action::ask_input("Please choose a new name", "Example name", 0),
            Action::ask_input_password("Password", "", json!({"step": 2}).to_string()),
            Action::ask_input_multi_line("List your favourite animals", "Cat\nDog", 3),
            Action::copy_to_clipboard("I like Pext"),
            Action::set_selection([Selection::new(entry).with_option("Queue"), Selection::default()]),
            Action::Close,
            Action::set_base_info("Type <b>stop</b> to stop"),
            Action::set_base_context(["Mute", "Stop"]),
        ]
    }

    #[test]
    fn every_kind_decodes_back_to_itself() {
        let actions = one_of_each();
        for &kind in ActionKind::ALL {
            assert!(actions.iter().any(|a| a.kind() == kind), "{kind} not covered");
        }
        for action in actions {
            let text = serde_json::to_string(&action).unwrap();
            let back: Action = serde_json::from_str(&text).unwrap();
            assert_eq!(back, action, "{text}");
        }
    }

    #[test]
    fn documented_examples_decode() {
        let action = Action::from_wire(&json!([11, "Please choose a new name", "Example name", 0])).unwrap();
        assert_eq!(action, Action::ask_input("Please choose a new name", "Example name", 0));

        let action = Action::from_wire(&json!([3, {"name": "Audio settings"}])).unwrap();
        assert_eq!(action, Action::add_entry(Entry::new("Audio settings")));

        assert_eq!(Action::from_wire(&json!([14, []])).unwrap(), Action::set_selection(Vec::new()));
        assert_eq!(Action::from_wire(&json!([15])).unwrap(), Action::Close);
    }

    #[test]
    fn optional_arguments_may_be_omitted() {
        assert_eq!(
            Action::from_wire(&json!([9, "Sure?"])).unwrap(),
            Action::AskQuestionDefaultYes { question: "Sure?".into(), identifier: Opaque::null() }
        );
        assert_eq!(Action::from_wire(&json!([7])).unwrap(), Action::set_header(None::<String>));
        assert_eq!(Action::from_wire(&json!([7, null])).unwrap(), Action::set_header(None::<String>));
    }

    #[test]
    fn set_selection_accepts_bare_entries() {
        let action = Action::from_wire(&json!([14, [{"name": "a"}, {"entry": {"name": "b"}, "option": "Edit"}]])).unwrap();
        assert_eq!(
            action,
            Action::set_selection([
                Selection::new(Entry::new("a")),
                Selection::new(Entry::new("b")).with_option("Edit"),
            ])
        );
    }

    #[test]
    fn unknown_tag() {
        let err = Action::from_wire(&json!([99, "future"])).unwrap_err();
        assert!(matches!(err, PextError::UnknownAction { tag: 99 }));
    }

    #[test]
    fn malformed_shapes() {
        let cases = [
            json!({"action": 3}),
            json!([]),
            json!(["add_entry", {"name": "x"}]),
            json!([-1]),
            json!([1]),
            json!([1, "a", "b"]),
            json!([1, 5]),
            json!([3, "Audio settings"]),
            json!([3, null]),
            json!([6, "extra"]),
            json!([11, "only text"]),
            json!([17, ["ok", 2]]),
            json!([14, [3]]),
        ];
        for case in cases {
            let err = Action::from_wire(&case).unwrap_err();
            assert!(matches!(err, PextError::MalformedMessage { .. }), "{case}: {err}");
        }
    }

    #[test]
    fn invalid_entry_type_is_a_validation_error() {
        let err = Action::from_wire(&json!([3, {"name": "x", "type": "command"}])).unwrap_err();
        assert!(matches!(err, PextError::Validation { expected: "EntryType", .. }));

        for list in [
            json!([{"name": "x", "type": "bogus"}]),
            json!([{"entry": {"name": "x", "type": "bogus"}}]),
            json!([{"entry": {"name": "x", "type": 7}, "option": "Edit"}]),
        ] {
            let err = Action::from_wire(&json!([14, list])).unwrap_err();
            assert!(
                matches!(err, PextError::Validation { expected: "EntryType", .. }),
                "{list} gave {err}"
            );
        }
    }

    #[test]
    fn non_entry_inside_selection_is_malformed() {
        for list in [json!([{"entry": null}]), json!([{"entry": "x"}]), json!(["x"])] {
            let err = Action::from_wire(&json!([14, list])).unwrap_err();
            assert!(
                matches!(err, PextError::MalformedMessage { kind: "set_selection", .. }),
                "{list} gave {err}"
            );
        }
    }

    #[test]
    fn malformed_error_names_the_kind() {
        let err = Action::from_wire(&json!([8, 42])).unwrap_err();
        assert_eq!(err.to_string(), "malformed set_filter message: filter must be text, got 42");
    }

    #[test]
    fn from_wire_str_reports_bad_json() {
        assert!(matches!(Action::from_wire_str("[1, "), Err(PextError::Json(_))));
        assert_eq!(Action::from_wire_str("[6]").unwrap(), Action::ClearEntries);
    }
}
