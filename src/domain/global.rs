//! Host-wide display defaults.

use serde::{Deserialize, Serialize};

/// Display defaults that do not belong to any single entry.
///
/// `header` is shown when no entry in the navigation history overrides it.
/// `options` are the global context-menu actions, and `info_html` is shown
/// whatever is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleGlobal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub info_html: String,
}

impl ModuleGlobal {
    /// Sets the fallback header.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the global context-menu options, offered when the current entry
    /// has none of its own.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fallback info block.
    #[must_use]
    pub fn with_info_html(mut self, info_html: impl Into<String>) -> Self {
        self.info_html = info_html.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let global = ModuleGlobal::default();
        assert_eq!(global.header, None);
        assert!(global.options.is_empty());
        assert_eq!(global.info_html, "");
    }

    #[test]
    fn empty_object_decodes_to_defaults() {
        let global: ModuleGlobal = serde_json::from_str("{}").unwrap();
        assert_eq!(global, ModuleGlobal::default());
    }
}
