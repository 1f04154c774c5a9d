//! Entry records and the entry type vocabulary.
//!
//! An [`Entry`] is one selectable or informational item a module shows in the
//! host's list. Only its [`EntryType`] is validated. Every other field is
//! stored as given, and the host's rendering layer decides what is sensible.

use super::error::{PextError, Result};
use super::opaque::Opaque;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// What happens when the user selects an entry.
///
/// Serialized as its lowercase name. Decoding also accepts the numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EntryType {
    /// Selecting it sends `selection_made` to the module.
    #[default]
    Entry = 0,
    /// Selecting it copies text to the clipboard. The module is not notified.
    Copyable = 1,
}

impl EntryType {
    /// Every member, in tag order.
    pub const ALL: [Self; 2] = [Self::Entry, Self::Copyable];

    /// The stable numeric tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// The stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Copyable => "copyable",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for EntryType {
    type Error = PextError;

    fn try_from(tag: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| PextError::validation(tag, "EntryType"))
    }
}

impl FromStr for EntryType {
    type Err = PextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| PextError::validation(format!("{s:?}"), "EntryType"))
    }
}

impl TryFrom<&Value> for EntryType {
    type Error = PextError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => name.parse(),
            Value::Number(n) => n
                .as_u64()
                .and_then(|tag| u8::try_from(tag).ok())
                .map_or_else(
                    || Err(PextError::validation(n, "EntryType")),
                    <Self as TryFrom<u8>>::try_from,
                ),
            other => Err(PextError::validation(other, "EntryType")),
        }
    }
}

impl Serialize for EntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::try_from(&raw).map_err(serde::de::Error::custom)
    }
}

/// One selectable or informational item.
///
/// Built with [`Entry::new`] and the `with_*` builders. Defaults: type
/// [`EntryType::Entry`], no options, empty info, no header, no copy name, no
/// module data.
///
/// # Examples
///
/// ```
/// use pext_contract::{Entry, EntryType};
///
/// let entry = Entry::new("Volume")
///     .with_type(EntryType::Copyable)
///     .with_copyname("amixer set Master 50%")
///     .with_options(["Mute", "Max"]);
///
/// assert_eq!(entry.copy_text(), "amixer set Master 50%");
/// assert_eq!(entry.options(), ["Mute", "Max"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    copyname: Option<String>,

    #[serde(rename = "type", default)]
    entry_type: EntryType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    info_html: String,

    /// `None` inherits the nearest header up the history; `Some("")` blanks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    header: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::opaque::deserialize_present"
    )]
    module_internal: Option<Opaque>,
}

impl Entry {
    /// Creates an entry with the given display name and default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the text copied to the clipboard instead of the name.
    #[must_use]
    pub fn with_copyname(mut self, copyname: impl Into<String>) -> Self {
        self.copyname = Some(copyname.into());
        self
    }

    /// Sets the entry type. Use [`Entry::set_type`] for unchecked input.
    #[must_use]
    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Sets the context-menu options offered for this entry.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the HTML info block shown while this entry is in the history.
    #[must_use]
    pub fn with_info_html(mut self, info_html: impl Into<String>) -> Self {
        self.info_html = info_html.into();
        self
    }

    /// Sets the header shown below this entry. An empty string blanks any
    /// inherited header.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Attaches module-private data, returned unchanged in `selection_made`.
    #[must_use]
    pub fn with_module_internal(mut self, data: Opaque) -> Self {
        self.module_internal = Some(data);
        self
    }

    /// Decodes an entry from an untyped value.
    ///
    /// An invalid `type` is reported as an `EntryType` validation error. Any
    /// other non-entry value, `null` included, is reported as not an `Entry`.
    ///
    /// # Errors
    ///
    /// Returns [`PextError::Validation`] if `value` is not an entry object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(fields) = value.as_object() else {
            return Err(PextError::validation(value, "Entry"));
        };
        if let Some(raw_type) = fields.get("type") {
            EntryType::try_from(raw_type)?;
        }
        Self::deserialize(value).map_err(|_| PextError::validation(value, "Entry"))
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit clipboard text, if any.
    #[must_use]
    pub fn copyname(&self) -> Option<&str> {
        self.copyname.as_deref()
    }

    /// The text copied when a copyable entry is selected: `copyname`, or the
    /// name when no copy name was given.
    #[must_use]
    pub fn copy_text(&self) -> &str {
        self.copyname.as_deref().unwrap_or(&self.name)
    }

    /// Whether selecting the entry navigates or copies.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Context-menu options. Empty means the global options apply.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// HTML info block, empty when unset.
    #[must_use]
    pub fn info_html(&self) -> &str {
        &self.info_html
    }

    /// The header override, if any.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The module's private data. Hosts pass it along and never read it.
    #[must_use]
    pub const fn module_internal(&self) -> Option<&Opaque> {
        self.module_internal.as_ref()
    }

    /// Replaces the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the clipboard text. `None` falls back to the name.
    pub fn set_copyname(&mut self, copyname: Option<String>) {
        self.copyname = copyname;
    }

    /// Sets the entry type from anything convertible into [`EntryType`].
    ///
    /// The conversion runs before any assignment, so a rejected value leaves the
    /// current type in place.
    ///
    /// # Errors
    ///
    /// Returns [`PextError::Validation`] if `value` is not an `EntryType` member.
    ///
    /// # Examples
    ///
    /// ```
    /// use pext_contract::{Entry, EntryType};
    ///
    /// let mut entry = Entry::new("x");
    /// entry.set_type("copyable")?;
    /// assert_eq!(entry.entry_type(), EntryType::Copyable);
    ///
    /// assert!(entry.set_type(5u8).is_err());
    /// assert_eq!(entry.entry_type(), EntryType::Copyable);
    /// # Ok::<(), pext_contract::PextError>(())
    /// ```
    pub fn set_type<T>(&mut self, value: T) -> Result<()>
    where
        T: TryInto<EntryType>,
        T::Error: Into<PextError>,
    {
        let entry_type = value.try_into().map_err(Into::into)?;
        self.entry_type = entry_type;
        Ok(())
    }

    /// Replaces the context-menu options.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    /// Replaces the HTML info block.
    pub fn set_info_html(&mut self, info_html: impl Into<String>) {
        self.info_html = info_html.into();
    }

    /// Replaces the header override. `None` inherits again.
    pub fn set_header(&mut self, header: Option<String>) {
        self.header = header;
    }

    /// Replaces or clears the module-private data.
    pub fn set_module_internal(&mut self, data: Option<Opaque>) {
        self.module_internal = data;
    }
}

impl TryFrom<&str> for EntryType {
    type Error = PextError;

    fn try_from(name: &str) -> Result<Self> {
        name.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_entry_matches_contract() {
        let entry = Entry::new("Audio settings");
        assert_eq!(entry.name(), "Audio settings");
        assert_eq!(entry.entry_type(), EntryType::Entry);
        assert!(entry.options().is_empty());
        assert_eq!(entry.info_html(), "");
        assert_eq!(entry.header(), None);
        assert_eq!(entry.copyname(), None);
        assert_eq!(entry.module_internal(), None);
    }

    #[test]
    fn options_are_not_shared_between_instances() {
        let mut first = Entry::new("a");
        let second = Entry::new("b");
        first.set_options(vec!["Edit".into()]);
        assert!(second.options().is_empty());
        assert!(Entry::new("c").options().is_empty());
    }

    #[test]
    fn every_member_round_trips_through_set_type() {
        for member in EntryType::ALL {
            let mut entry = Entry::new("x");
            entry.set_type(member).unwrap();
            assert_eq!(entry.entry_type(), member);

            entry.set_type(member.tag()).unwrap();
            assert_eq!(entry.entry_type(), member);

            entry.set_type(member.name()).unwrap();
            assert_eq!(entry.entry_type(), member);
        }
    }

    #[test]
    fn rejected_type_leaves_previous_value() {
        let mut entry = Entry::new("x").with_type(EntryType::Copyable);

        for bad in [2u8, 9, u8::MAX] {
            let err = entry.set_type(bad).unwrap_err();
            assert!(matches!(err, PextError::Validation { expected: "EntryType", .. }));
        }
        let err = entry.set_type("command").unwrap_err();
        assert_eq!(err.to_string(), "\"command\" is not a valid EntryType");

        assert_eq!(entry.entry_type(), EntryType::Copyable);
    }

    #[test]
    fn entry_type_from_json_value() {
        assert_eq!(EntryType::try_from(&json!("copyable")).unwrap(), EntryType::Copyable);
        assert_eq!(EntryType::try_from(&json!(0)).unwrap(), EntryType::Entry);
        assert!(EntryType::try_from(&json!(-1)).is_err());
        assert!(EntryType::try_from(&json!(256)).is_err());
        assert!(EntryType::try_from(&json!(null)).is_err());
        assert!(EntryType::try_from(&json!({"type": "entry"})).is_err());
    }

    #[test]
    fn copy_text_falls_back_to_name() {
        let plain = Entry::new("hunter2").with_type(EntryType::Copyable);
        assert_eq!(plain.copy_text(), "hunter2");

        let explicit = plain.clone().with_copyname("correct horse");
        assert_eq!(explicit.copy_text(), "correct horse");
    }

    #[test]
    fn full_entry_round_trips_through_json() {
        let entry = Entry::new("Track 3")
            .with_copyname("spotify:track:3")
            .with_type(EntryType::Copyable)
            .with_options(["Queue", "Play next"])
            .with_info_html("<b>3:41</b>")
            .with_header("")
            .with_module_internal(Opaque::from_value(json!({"uri": [3, "x"], "n": null})));

        let text = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.header(), Some(""));
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let entry: Entry = serde_json::from_str(r#"{"name": "Audio settings"}"#).unwrap();
        assert_eq!(entry, Entry::new("Audio settings"));

        let bad = serde_json::from_str::<Entry>(r#"{"name": "x", "type": "command"}"#);
        assert!(bad.unwrap_err().to_string().contains("is not a valid EntryType"));
    }

    #[test]
    fn null_module_internal_is_kept() {
        let entry = Entry::new("x").with_module_internal(Opaque::null());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, json!({"name": "x", "type": "entry", "module_internal": null}));

        let back = Entry::from_value(&json).unwrap();
        assert_eq!(back.module_internal(), Some(&Opaque::null()));
        assert_eq!(back, entry);

        let absent = Entry::from_value(&json!({"name": "x"})).unwrap();
        assert_eq!(absent.module_internal(), None);
    }
}
