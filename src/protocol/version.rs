//! API versioning for feature detection.
//!
//! The action vocabulary and the record shapes are versioned together. A host
//! advertises the version it implements, and a module checks
//! [`ApiVersion::supports`] before sending an action that arrived later.

use super::kind::ActionKind;
use crate::domain::error::{PextError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The contract version implemented by this crate.
pub const API_VERSION: ApiVersion = ApiVersion::new(0, 8, 0);

/// A `major.minor.patch` contract version.
///
/// Parsing accepts a missing patch component (`"0.6"` is `0.6.0`), since older
/// documentation wrote versions that way.
///
/// # Examples
///
/// ```
/// use pext_contract::{ActionKind, ApiVersion};
///
/// let host: ApiVersion = "0.6".parse()?;
/// assert!(host.supports(ActionKind::SetBaseInfo));
/// assert!(!host.supports(ActionKind::ClearEntries));
/// # Ok::<(), pext_contract::PextError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether a host running this version understands `kind`.
    #[must_use]
    pub fn supports(self, kind: ActionKind) -> bool {
        kind.introduced_in() <= self
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = PextError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PextError::validation(format!("{s:?}"), "API version");

        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(part) => part.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let version = Self::new(next(true)?, next(true)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
