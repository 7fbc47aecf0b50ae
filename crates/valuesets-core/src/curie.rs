//! # Compact URIs
//!
//! A CURIE is a prefixed identifier such as `GO:0008150`, where the prefix
//! names the source vocabulary. Schemas are authored by hand, so the value is
//! stored verbatim and never rejected; a missing separator simply means the
//! prefix cannot be derived.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ontology term reference as written in a schema's `meaning` slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curie(String);

impl Curie {
    /// Wrap a raw identifier. No validation is performed.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier exactly as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased text before the first `:`, or `None` when there is no separator.
    ///
    /// ```
    /// use valuesets_core::Curie;
    /// assert_eq!(Curie::new("NCIT:C12345").prefix().as_deref(), Some("ncit"));
    /// assert_eq!(Curie::new("no-separator").prefix(), None);
    /// ```
    pub fn prefix(&self) -> Option<String> {
        self.0
            .split_once(':')
            .map(|(prefix, _)| prefix.to_lowercase())
    }

    /// True when the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Curie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Curie {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Curie {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Curie {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
