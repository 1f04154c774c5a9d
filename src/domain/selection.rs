//! Navigation history steps.
//!
//! A [`Selection`] records one choice the user made: an entry, an option from
//! an entry's (or the global) context menu, or neither for a free-text step.
//! The host hands the full ordered history to the module in `selection_made`,
//! and a module can rewrite it with `set_selection`.
//!
//! # Absent entries
//!
//! In the typed API `entry` is an `Option<Entry>`, and `None` is the default.
//! At the dynamic boundary ([`Selection::set_entry_from_value`] and wire
//! decoding) only an entry object is accepted. An explicit `null` is rejected
//! the same way any other non-entry value is. To encode "no entry", leave the
//! key out.

use super::entry::Entry;
use super::error::Result;
use super::opaque::Opaque;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One recorded step of the user's navigation history.
///
/// # Examples
///
/// ```
/// use pext_contract::{Entry, Selection};
///
/// let step = Selection::new(Entry::new("Wi-Fi")).with_option("Forget network");
/// assert_eq!(step.entry().map(Entry::name), Some("Wi-Fi"));
/// assert!(step.option().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present_entry"
    )]
    entry: Option<Entry>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::opaque::deserialize_present"
    )]
    option: Option<Opaque>,
}

impl Selection {
    /// A step that selected `entry`.
    #[must_use]
    pub const fn new(entry: Entry) -> Self {
        Self {
            entry: Some(entry),
            option: None,
        }
    }

    /// A step with no entry, for example free text typed at the root.
    #[must_use]
    pub const fn without_entry() -> Self {
        Self {
            entry: None,
            option: None,
        }
    }

    /// Marks the step as choosing `option` from the entry's context menu, or
    /// from the global menu when there is no entry.
    #[must_use]
    pub fn with_option(mut self, option: impl Into<Opaque>) -> Self {
        self.option = Some(option.into());
        self
    }

    #[must_use]
    pub const fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    #[must_use]
    pub const fn option(&self) -> Option<&Opaque> {
        self.option.as_ref()
    }

    pub fn set_entry(&mut self, entry: Entry) {
        self.entry = Some(entry);
    }

    /// Turns the step into a global-option choice.
    pub fn clear_entry(&mut self) {
        self.entry = None;
    }

    pub fn set_option(&mut self, option: Option<Opaque>) {
        self.option = option;
    }

    /// Sets the entry from an untyped value, as received from a module over a
    /// dynamic transport.
    ///
    /// Only a JSON object that decodes as an [`Entry`] is accepted. Anything
    /// else fails, `null` included, and the current entry is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PextError::Validation`](crate::PextError::Validation) if `value`
    /// is not an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use pext_contract::Selection;
    /// use serde_json::json;
    ///
    /// let mut step = Selection::default();
    /// step.set_entry_from_value(&json!({"name": "Bluetooth"}))?;
    /// assert!(step.entry().is_some());
    ///
    /// assert!(step.set_entry_from_value(&json!(null)).is_err());
    /// assert!(step.entry().is_some());
    /// # Ok::<(), pext_contract::PextError>(())
    /// ```
    pub fn set_entry_from_value(&mut self, value: &Value) -> Result<()> {
        let entry = Entry::from_value(value)?;
        self.entry = Some(entry);
        Ok(())
    }
}

fn deserialize_present_entry<'de, D>(deserializer: D) -> std::result::Result<Option<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Entry::from_value(&raw)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryType, PextError};
    use serde_json::json;

    #[test]
    fn default_has_no_entry_and_no_option() {
        let step = Selection::default();
        assert_eq!(step.entry(), None);
        assert_eq!(step.option(), None);
        assert_eq!(step, Selection::without_entry());
    }

    #[test]
    fn typed_api_allows_clearing_entry() {
        let mut step = Selection::new(Entry::new("a"));
        step.clear_entry();
        assert_eq!(step.entry(), None);
    }

    #[test]
    fn dynamic_setter_rejects_non_entries_including_null() {
        let mut step = Selection::new(Entry::new("kept"));

        for bad in [json!(null), json!("Entry"), json!(3), json!([]), json!({"type": "entry"})] {
            let err = step.set_entry_from_value(&bad).unwrap_err();
            assert!(
                matches!(err, PextError::Validation { expected: "Entry", .. }),
                "{bad} gave {err}"
            );
        }

        assert_eq!(step.entry().map(Entry::name), Some("kept"));
    }

    #[test]
    fn dynamic_setter_error_mentions_rejected_value() {
        let mut step = Selection::default();
        let err = step.set_entry_from_value(&json!(null)).unwrap_err();
        assert_eq!(err.to_string(), "null is not a valid Entry");
    }

    #[test]
    fn dynamic_setter_reports_bad_entry_type() {
        let mut step = Selection::default();
        let err = step
            .set_entry_from_value(&json!({"name": "x", "type": 4}))
            .unwrap_err();
        assert!(err.to_string().contains("EntryType"));
    }

    #[test]
    fn omitted_key_means_no_entry_but_null_is_rejected() {
        let step: Selection = serde_json::from_value(json!({"option": "Mute"})).unwrap();
        assert_eq!(step.entry(), None);
        assert_eq!(step.option(), Some(&Opaque::from("Mute")));

        let err = serde_json::from_value::<Selection>(json!({"entry": null})).unwrap_err();
        assert!(err.to_string().contains("null is not a valid Entry"));
    }

    #[test]
    fn null_option_is_kept() {
        let step: Selection = serde_json::from_value(json!({"entry": {"name": "a"}, "option": null})).unwrap();
        assert_eq!(step.option(), Some(&Opaque::null()));

        let text = serde_json::to_string(&step).unwrap();
        assert_eq!(serde_json::from_str::<Selection>(&text).unwrap(), step);
    }

    #[test]
    fn round_trips_with_entry_and_option() {
        let step = Selection::new(Entry::new("Song").with_type(EntryType::Copyable))
            .with_option(json!({"index": 2}).to_string());
        let text = serde_json::to_string(&step).unwrap();
        let back: Selection = serde_json::from_str(&text).unwrap();
        assert_eq!(back, step);
    }
}
