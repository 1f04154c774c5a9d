//! The closed vocabulary of action kinds.
//!
//! Each kind has a numeric tag that never changes, a snake_case name, the API
//! version that introduced it and the number of positional arguments it takes
//! on the wire. New kinds are appended with the next free tag.

use super::version::ApiVersion;
use crate::domain::error::{PextError, Result};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Declares [`ActionKind`] and its lookup table from one list, so the tag,
/// name, version and arity of a kind cannot drift apart.
macro_rules! action_kinds {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $tag:literal, $name:literal, ($maj:literal, $min:literal, $pat:literal), $arity:expr;
        )*
    ) => {
        /// Tag-only view of an [`Action`](super::Action).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum ActionKind {
            $(
                $(#[$meta])*
                $variant = $tag,
            )*
        }

        impl ActionKind {
            /// Every kind, in tag order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The snake_case name used in documentation and logs.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The API version that introduced this kind.
            #[must_use]
            pub const fn introduced_in(self) -> ApiVersion {
                match self {
                    $(Self::$variant => ApiVersion::new($maj, $min, $pat),)*
                }
            }

            /// Accepted number of positional arguments on the wire.
            #[must_use]
            pub const fn arity(self) -> RangeInclusive<usize> {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }
        }
    };
}

action_kinds! {
    /// Show an error and unload the module.
    CriticalError = 0, "critical_error", (0, 1, 0), 1..=1;
    /// Show a message.
    AddMessage = 1, "add_message", (0, 1, 0), 1..=1;
    /// Show an error without unloading.
    AddError = 2, "add_error", (0, 1, 0), 1..=1;
    AddEntry = 3, "add_entry", (0, 1, 0), 1..=1;
    PrependEntry = 4, "prepend_entry", (0, 1, 0), 1..=1;
    RemoveEntry = 5, "remove_entry", (0, 1, 0), 1..=1;
    ClearEntries = 6, "clear_entries", (0, 8, 0), 0..=0;
    /// Replace the header text; without an argument, remove it.
    SetHeader = 7, "set_header", (0, 1, 0), 0..=1;
    /// Replace the search bar text.
    SetFilter = 8, "set_filter", (0, 1, 0), 1..=1;
    AskQuestionDefaultYes = 9, "ask_question_default_yes", (0, 1, 0), 1..=2;
    AskQuestionDefaultNo = 10, "ask_question_default_no", (0, 1, 0), 1..=2;
    AskInput = 11, "ask_input", (0, 1, 0), 2..=3;
    AskInputPassword = 12, "ask_input_password", (0, 1, 0), 2..=3;
    AskInputMultiLine = 13, "ask_input_multi_line", (0, 1, 0), 2..=3;
    /// Replace the navigation history; an empty list returns to the root.
    SetSelection = 14, "set_selection", (0, 1, 0), 1..=1;
    /// Close the window.
    Close = 15, "close", (0, 1, 0), 0..=0;
    SetBaseInfo = 16, "set_base_info", (0, 6, 0), 1..=1;
    SetBaseContext = 17, "set_base_context", (0, 6, 0), 1..=1;
    /// Copy text to the clipboard. Documented from 0.1.0 but first given a
    /// tag in 0.8.0.
    CopyToClipboard = 18, "copy_to_clipboard", (0, 8, 0), 1..=1;
}

impl ActionKind {
    /// The stable numeric tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Looks up a kind by tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| u64::from(k.tag()) == tag)
    }

    /// Whether this kind opens a prompt the user must answer.
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(
            self,
            Self::AskQuestionDefaultYes
                | Self::AskQuestionDefaultNo
                | Self::AskInput
                | Self::AskInputPassword
                | Self::AskInputMultiLine
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u64> for ActionKind {
    type Error = PextError;

    fn try_from(tag: u64) -> Result<Self> {
        Self::from_tag(tag).ok_or(PextError::UnknownAction { tag })
    }
}

impl FromStr for ActionKind {
    type Err = PextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| PextError::validation(format!("{s:?}"), "ActionKind"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Published tag table. Changing a row breaks deployed modules.
    const TAGS: &[(&str, u8)] = &[
        ("critical_error", 0),
        ("add_message", 1),
        ("add_error", 2),
        ("add_entry", 3),
        ("prepend_entry", 4),
        ("remove_entry", 5),
        ("clear_entries", 6),
        ("set_header", 7),
        ("set_filter", 8),
        ("ask_question_default_yes", 9),
        ("ask_question_default_no", 10),
        ("ask_input", 11),
        ("ask_input_password", 12),
        ("ask_input_multi_line", 13),
        ("set_selection", 14),
        ("close", 15),
        ("set_base_info", 16),
        ("set_base_context", 17),
        ("copy_to_clipboard", 18),
    ];

    #[test]
    fn tags_match_published_table() {
        assert_eq!(ActionKind::ALL.len(), TAGS.len());
        for &(name, tag) in TAGS {
            let kind: ActionKind = name.parse().unwrap();
            assert_eq!(kind.tag(), tag, "{name} was renumbered");
            assert_eq!(ActionKind::from_tag(u64::from(tag)), Some(kind));
        }
    }

    #[test]
    fn tags_and_names_are_unique() {
        let tags: HashSet<u8> = ActionKind::ALL.iter().map(|k| k.tag()).collect();
        let names: HashSet<&str> = ActionKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(tags.len(), ActionKind::ALL.len());
        assert_eq!(names.len(), ActionKind::ALL.len());
    }

    #[test]
    fn unknown_tag_is_reported() {
        assert_eq!(ActionKind::from_tag(19), None);
        let err = ActionKind::try_from(400).unwrap_err();
        assert!(matches!(err, PextError::UnknownAction { tag: 400 }));
        assert!("clear_entry_list".parse::<ActionKind>().is_err());
    }

    #[test]
    fn prompt_kinds() {
        let prompts: Vec<_> = ActionKind::ALL.iter().filter(|k| k.is_prompt()).collect();
        assert_eq!(prompts.len(), 5);
        assert!(prompts.iter().all(|k| k.name().starts_with("ask_")));
    }
}
