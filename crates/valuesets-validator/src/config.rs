//! Run-wide validation settings. Built once per invocation, then read-only.

use std::path::PathBuf;

use valuesets_ontology::{default_data_dir, AdapterLocator, OntologyError, DYNAMIC_LOCATOR};

/// How many warnings the terse report lists before summarizing the rest.
pub const DEFAULT_WARNING_LIMIT: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Ontology adapter locator, e.g. `sqlite:obo:` or `sqlite:obo:merged`.
    pub adapter: String,
    /// Report label mismatches as errors instead of warnings.
    pub strict_mode: bool,
    /// Remember resolved labels for the rest of the run.
    pub cache_labels: bool,
    /// Directory holding SemSQL databases named `<prefix>.db`.
    pub data_dir: PathBuf,
    pub warning_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            adapter: DYNAMIC_LOCATOR.to_string(),
            strict_mode: false,
            cache_labels: true,
            data_dir: default_data_dir(),
            warning_limit: DEFAULT_WARNING_LIMIT,
        }
    }
}

impl ValidationConfig {
    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = adapter.into();
        self
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn with_cache_labels(mut self, cache: bool) -> Self {
        self.cache_labels = cache;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_warning_limit(mut self, limit: usize) -> Self {
        self.warning_limit = limit;
        self
    }

    /// Parse the adapter locator.
    ///
    /// # Errors
    ///
    /// `UnsupportedLocator` when this build has no backend for the locator.
    pub fn locator(&self) -> Result<AdapterLocator, OntologyError> {
        self.adapter.parse()
    }
}
