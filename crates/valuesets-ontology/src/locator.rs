//! # Adapter Locators
//!
//! A locator string selects the ontology backend for a run.
//!
//! | Locator              | Meaning                                              |
//! |----------------------|------------------------------------------------------|
//! | `sqlite:obo:`        | one SemSQL database per CURIE prefix, chosen lazily  |
//! | `sqlite:obo:<name>`  | the single SemSQL database `<name>` for every prefix |
//! | `sqlite:<path>`      | the single SemSQL database file at `<path>`          |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::source::OntologyError;

/// The default locator: per-prefix databases from the data directory.
pub const DYNAMIC_LOCATOR: &str = "sqlite:obo:";

/// Name of the combined database used when a prefix has no database of its own.
pub const MERGED_ONTOLOGY: &str = "merged";

const SQLITE_SCHEME: &str = "sqlite:";

/// A parsed adapter locator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdapterLocator {
    /// Pick a database per CURIE prefix, falling back to the merged database.
    #[default]
    DynamicObo,
    /// One named database from the data directory, shared by every prefix.
    Obo(String),
    /// One database file, shared by every prefix.
    SqliteFile(PathBuf),
}

impl AdapterLocator {
    /// True for the per-prefix policy.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::DynamicObo)
    }
}

impl FromStr for AdapterLocator {
    type Err = OntologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || OntologyError::UnsupportedLocator(s.to_string());

        let rest = s.strip_prefix(SQLITE_SCHEME).ok_or_else(unsupported)?;
        match rest.strip_prefix("obo:") {
            Some("") => Ok(Self::DynamicObo),
            Some(name) => Ok(Self::Obo(name.to_string())),
            None if rest.is_empty() => Err(unsupported()),
            None => Ok(Self::SqliteFile(PathBuf::from(rest))),
        }
    }
}

impl fmt::Display for AdapterLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DynamicObo => f.write_str(DYNAMIC_LOCATOR),
            Self::Obo(name) => write!(f, "{DYNAMIC_LOCATOR}{name}"),
            Self::SqliteFile(path) => write!(f, "{SQLITE_SCHEME}{}", path.display()),
        }
    }
}
