//! Opaque pass-through values.
//!
//! Modules attach data the host must carry without looking at it: an entry's
//! `module_internal` blob, the identifier of an `ask_*` prompt, the option
//! chosen in a [`Selection`](super::Selection). [`Opaque`] wraps such a value.
//! The host may clone, store and compare it, and echo it back. Only the module
//! decodes it, through [`Opaque::decode`].

use super::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A module-owned value the host carries unmodified.
///
/// Equality is structural, which is all the contract promises: a value sent
/// out comes back equal.
///
/// # Examples
///
/// ```
/// use pext_contract::Opaque;
///
/// #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
/// struct Hidden { row: u32 }
///
/// let blob = Opaque::new(&Hidden { row: 4 })?;
/// let back: Hidden = blob.decode()?;
/// assert_eq!(back, Hidden { row: 4 });
/// # Ok::<(), pext_contract::PextError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opaque(Value);

impl Opaque {
    /// Serializes any module value into an opaque blob.
    ///
    /// # Errors
    ///
    /// Returns [`PextError::Json`](crate::PextError::Json) if the value cannot
    /// be represented as JSON (e.g. a map with non-string keys).
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self(serde_json::to_value(value)?))
    }

    /// Wraps an already-built JSON value.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The `null` blob, used when a module omits an optional identifier.
    #[must_use]
    pub const fn null() -> Self {
        Self(Value::Null)
    }

    /// Decodes the blob back into the module's own type.
    ///
    /// Module-side only. Host code never calls this.
    ///
    /// # Errors
    ///
    /// Returns [`PextError::Json`](crate::PextError::Json) if the blob does not
    /// have the shape of `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }

    /// Unwraps into the underlying JSON value, for transports.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    pub(crate) const fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Deserializes an optional opaque field so that a present key is always
/// `Some`, even when its value is `null`. Use with `#[serde(default)]`, which
/// covers the absent key.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Opaque>, D::Error>
where
    D: Deserializer<'de>,
{
    Opaque::deserialize(deserializer).map(Some)
}

impl From<&str> for Opaque {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for Opaque {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<i64> for Opaque {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for Opaque {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<i32> for Opaque {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<bool> for Opaque {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_blob_survives_json_round_trip() {
        let blob = Opaque::from_value(json!({"ids": [1, 2, 3], "nested": {"k": null}}));
        let text = serde_json::to_string(&blob).unwrap();
        assert_eq!(text, r#"{"ids":[1,2,3],"nested":{"k":null}}"#);

        let back: Opaque = serde_json::from_str(&text).unwrap();
        assert_eq!(back, blob);
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let blob = Opaque::from("not a number");
        assert!(blob.decode::<u32>().is_err());
        assert_eq!(blob.decode::<String>().unwrap(), "not a number");
    }

    #[test]
    fn integer_identifiers_compare_equal() {
        assert_eq!(Opaque::from(0), Opaque::from_value(json!(0)));
        assert_ne!(Opaque::from(0), Opaque::from("0"));
    }
}
