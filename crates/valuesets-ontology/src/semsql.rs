//! # SemSQL Label Source
//!
//! Reads labels from SemSQL databases: SQLite files holding an ontology as
//! RDF-style triples in a `statements(subject, predicate, object, value, ...)`
//! table. Labels are the literal `value` of `rdfs:label` statements.
//!
//! Databases are looked up as `<data_dir>/<name>.db`, which is where the
//! OBO SemSQL builds are conventionally cached. Nothing is downloaded; a
//! missing file is an error the resolver degrades around.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use valuesets_core::Curie;

use crate::source::{LabelSource, OntologyError, SourceFactory};

const LABEL_QUERY: &str = "SELECT value FROM statements \
     WHERE subject = ?1 AND predicate = 'rdfs:label' AND value IS NOT NULL LIMIT 1";

const STATEMENTS_TABLE_QUERY: &str =
    "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = 'statements'";

/// The conventional SemSQL cache directory.
///
/// `$PYSTOW_HOME/oaklib` when `PYSTOW_HOME` is set, otherwise
/// `$HOME/.data/oaklib`, otherwise `.data/oaklib` relative to the
/// working directory.
pub fn default_data_dir() -> PathBuf {
    if let Some(root) = std::env::var_os("PYSTOW_HOME") {
        return PathBuf::from(root).join("oaklib");
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".data").join("oaklib"),
        None => PathBuf::from(".data").join("oaklib"),
    }
}

/// One open SemSQL database.
pub struct SemsqlSource {
    path: PathBuf,
    conn: Connection,
}

impl std::fmt::Debug for SemsqlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemsqlSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SemsqlSource {
    /// Open an existing database read-only.
    ///
    /// # Errors
    ///
    /// `DatabaseNotFound` when no file exists at `path`, `NotSemsql` when the
    /// file has no `statements` table, `Sqlite` for any other SQLite failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(OntologyError::DatabaseNotFound { path: display });
        }

        let sqlite_err = |source| OntologyError::Sqlite {
            path: display.clone(),
            source,
        };

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(sqlite_err)?;

        let has_statements = conn
            .query_row(STATEMENTS_TABLE_QUERY, [], |_| Ok(()))
            .optional()
            .map_err(sqlite_err)?
            .is_some();
        if !has_statements {
            return Err(OntologyError::NotSemsql { path: display });
        }

        Ok(Self { path, conn })
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LabelSource for SemsqlSource {
    fn label(&self, curie: &Curie) -> Result<Option<String>, OntologyError> {
        self.conn
            .query_row(LABEL_QUERY, params![curie.as_str()], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| OntologyError::Lookup {
                curie: curie.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Opens [`SemsqlSource`]s from a data directory.
#[derive(Debug, Clone)]
pub struct SemsqlFactory {
    data_dir: PathBuf,
}

impl SemsqlFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where the database for `name` is expected.
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.db"))
    }
}

impl Default for SemsqlFactory {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl SourceFactory for SemsqlFactory {
    fn open_ontology(&self, name: &str) -> Result<Box<dyn LabelSource>, OntologyError> {
        self.open_file(&self.database_path(name))
    }

    fn open_file(&self, path: &Path) -> Result<Box<dyn LabelSource>, OntologyError> {
        Ok(Box::new(SemsqlSource::open(path)?))
    }
}
