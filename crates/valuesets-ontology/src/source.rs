//! # Label Sources
//!
//! The seam between the resolver and concrete ontology backends.

use std::path::Path;

use thiserror::Error;

use valuesets_core::Curie;

use crate::locator::AdapterLocator;

/// Error raised by an ontology backend.
///
/// These never escape [`LabelResolver`](crate::LabelResolver); they are
/// logged and turned into absent labels.
#[derive(Error, Debug)]
pub enum OntologyError {
    /// The locator names a backend this build cannot provide.
    #[error("unsupported ontology adapter locator '{0}'")]
    UnsupportedLocator(String),

    /// The per-prefix locator does not name a single database.
    #[error("locator '{0}' selects databases per prefix and cannot be opened as one source")]
    NotASingleSource(String),

    /// No database file exists where one was expected.
    #[error("ontology database not found at '{path}'")]
    DatabaseNotFound { path: String },

    /// The file opened but lacks the SemSQL `statements` table.
    #[error("'{path}' is not a SemSQL database: no 'statements' table")]
    NotSemsql { path: String },

    /// The SQLite layer failed.
    #[error("sqlite error for '{path}': {source}")]
    Sqlite {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A backend-specific lookup failure.
    #[error("label lookup failed for {curie}: {reason}")]
    Lookup { curie: String, reason: String },
}

/// Something that can report the label an ontology asserts for a term.
pub trait LabelSource {
    /// The label for `curie`, or `None` when the term is unknown or unlabeled.
    fn label(&self, curie: &Curie) -> Result<Option<String>, OntologyError>;
}

/// Opens label sources on demand.
pub trait SourceFactory {
    /// Open the named ontology (a lowercase CURIE prefix, or `merged`).
    fn open_ontology(&self, name: &str) -> Result<Box<dyn LabelSource>, OntologyError>;

    /// Open a database at an explicit path.
    fn open_file(&self, path: &Path) -> Result<Box<dyn LabelSource>, OntologyError>;

    /// Open the single source a non-dynamic locator names.
    fn open_locator(
        &self,
        locator: &AdapterLocator,
    ) -> Result<Box<dyn LabelSource>, OntologyError> {
        match locator {
            AdapterLocator::Obo(name) => self.open_ontology(name),
            AdapterLocator::SqliteFile(path) => self.open_file(path),
            AdapterLocator::DynamicObo => {
                Err(OntologyError::NotASingleSource(locator.to_string()))
            }
        }
    }
}
