//! Typed actions a module sends to the host.
//!
//! Each [`Action`] variant carries exactly the arguments its kind requires, so
//! a mis-shaped message cannot be built in Rust. The positional wire form
//! lives in [`super::wire`].

use super::kind::ActionKind;
use crate::domain::{Entry, Opaque, Selection};

/// A request from a module to the host.
///
/// # Examples
///
/// ```
/// use pext_contract::{Action, ActionKind, Entry};
///
/// let action = Action::add_entry(Entry::new("Audio settings"));
/// assert_eq!(action.kind(), ActionKind::AddEntry);
/// assert_eq!(action.to_wire(), serde_json::json!([3, {"name": "Audio settings", "type": "entry"}]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show an error message and unload the module.
    CriticalError { message: String },
    AddMessage { message: String },
    AddError { message: String },
    AddEntry { entry: Entry },
    PrependEntry { entry: Entry },
    /// Remove the first entry equal to `entry`.
    RemoveEntry { entry: Entry },
    ClearEntries,
    /// `None` removes the header.
    SetHeader { header: Option<String> },
    SetFilter { filter: String },
    AskQuestionDefaultYes { question: String, identifier: Opaque },
    AskQuestionDefaultNo { question: String, identifier: Opaque },
    AskInput { text: String, prefill: String, identifier: Opaque },
    AskInputPassword { text: String, prefill: String, identifier: Opaque },
    /// `prefill` may contain newlines.
    AskInputMultiLine { text: String, prefill: String, identifier: Opaque },
    CopyToClipboard { text: String },
    /// Replace the navigation history. An empty list returns to the root screen.
    SetSelection { list: Vec<Selection> },
    Close,
    /// HTML shown regardless of the active selection.
    SetBaseInfo { info: String },
    /// Context menu reachable from the header.
    SetBaseContext { options: Vec<String> },
}

/// Generates convenience constructors that take `impl Into` arguments.
macro_rules! action_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl Action {
            $(
                #[doc = concat!("Create a `", stringify!($variant), "` action.")]
                #[must_use]
                pub fn $builder_name($($field: impl Into<$ty>),*) -> Self {
                    Self::$variant {
                        $($field: $field.into(),)*
                    }
                }
            )*
        }
    };
}

action_builders! {
    critical_error(CriticalError { message: String }),
    add_message(AddMessage { message: String }),
    add_error(AddError { message: String }),
    add_entry(AddEntry { entry: Entry }),
    prepend_entry(PrependEntry { entry: Entry }),
    remove_entry(RemoveEntry { entry: Entry }),
    set_filter(SetFilter { filter: String }),
    ask_question_default_yes(AskQuestionDefaultYes { question: String, identifier: Opaque }),
    ask_question_default_no(AskQuestionDefaultNo { question: String, identifier: Opaque }),
    ask_input(AskInput { text: String, prefill: String, identifier: Opaque }),
    ask_input_password(AskInputPassword { text: String, prefill: String, identifier: Opaque }),
    ask_input_multi_line(AskInputMultiLine { text: String, prefill: String, identifier: Opaque }),
    copy_to_clipboard(CopyToClipboard { text: String }),
    set_base_info(SetBaseInfo { info: String }),
}

impl Action {
    /// Sets the header, or removes it when `header` is `None`.
    #[must_use]
    pub fn set_header(header: Option<impl Into<String>>) -> Self {
        Self::SetHeader {
            header: header.map(Into::into),
        }
    }

    #[must_use]
    pub fn set_selection(list: impl IntoIterator<Item = Selection>) -> Self {
        Self::SetSelection {
            list: list.into_iter().collect(),
        }
    }

    /// Replaces the history with one step per entry, the way older modules
    /// passed plain entries to `set_selection`.
    #[must_use]
    pub fn set_selection_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self::set_selection(entries.into_iter().map(Selection::new))
    }

    #[must_use]
    pub fn set_base_context<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SetBaseContext {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// The kind of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::CriticalError { .. } => ActionKind::CriticalError,
            Self::AddMessage { .. } => ActionKind::AddMessage,
            Self::AddError { .. } => ActionKind::AddError,
            Self::AddEntry { .. } => ActionKind::AddEntry,
            Self::PrependEntry { .. } => ActionKind::PrependEntry,
            Self::RemoveEntry { .. } => ActionKind::RemoveEntry,
            Self::ClearEntries => ActionKind::ClearEntries,
            Self::SetHeader { .. } => ActionKind::SetHeader,
            Self::SetFilter { .. } => ActionKind::SetFilter,
            Self::AskQuestionDefaultYes { .. } => ActionKind::AskQuestionDefaultYes,
            Self::AskQuestionDefaultNo { .. } => ActionKind::AskQuestionDefaultNo,
            Self::AskInput { .. } => ActionKind::AskInput,
            Self::AskInputPassword { .. } => ActionKind::AskInputPassword,
            Self::AskInputMultiLine { .. } => ActionKind::AskInputMultiLine,
            Self::CopyToClipboard { .. } => ActionKind::CopyToClipboard,
            Self::SetSelection { .. } => ActionKind::SetSelection,
            Self::Close => ActionKind::Close,
            Self::SetBaseInfo { .. } => ActionKind::SetBaseInfo,
            Self::SetBaseContext { .. } => ActionKind::SetBaseContext,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_pick_matching_kind() {
        assert_eq!(Action::critical_error("boom").kind(), ActionKind::CriticalError);
        assert_eq!(Action::set_header(None::<String>).kind(), ActionKind::SetHeader);
        assert_eq!(Action::ClearEntries.kind(), ActionKind::ClearEntries);
        assert_eq!(
            Action::ask_input("Please choose a new name", "Example name", 0).kind(),
            ActionKind::AskInput
        );
    }

    #[test]
    fn ask_input_keeps_arguments_in_order() {
        let action = Action::ask_input_multi_line("List your favourite animals", "Cat\nDog", "pets");
        let Action::AskInputMultiLine { text, prefill, identifier } = action else {
            panic!("wrong variant");
        };
        assert_eq!(text, "List your favourite animals");
        assert_eq!(prefill, "Cat\nDog");
        assert_eq!(identifier, Opaque::from("pets"));
    }

    #[test]
    fn selection_from_entries() {
        let action = Action::set_selection_entries([Entry::new("a"), Entry::new("b")]);
        let Action::SetSelection { list } = action else {
            panic!("wrong variant");
        };
        let names: Vec<_> = list.iter().filter_map(Selection::entry).map(Entry::name).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
