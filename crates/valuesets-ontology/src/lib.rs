//! # valuesets-ontology — Ontology Label Resolution
//!
//! Answers one question: what label does an ontology assert for a CURIE?
//!
//! ## Layers
//!
//! - [`locator`] — parses the adapter locator string given on the command
//!   line (`sqlite:obo:`, `sqlite:obo:merged`, `sqlite:/path/to/db`).
//! - [`source`] — the [`LabelSource`] and [`SourceFactory`] seams. Anything
//!   that can map a CURIE to a label plugs in here.
//! - [`semsql`] — the SQLite-backed source reading SemSQL ontology
//!   databases from a local data directory.
//! - [`resolver`] — [`LabelResolver`], which routes CURIEs to sources by
//!   prefix, caches outcomes, and degrades to "no label" whenever a source
//!   is missing or a lookup fails.
//!
//! ## Crate Policy
//!
//! - Resolution never fails. Every backend problem becomes an absent label
//!   plus a log line; callers decide how to report it.
//! - No network access. Ontology databases must already be on disk.

pub mod locator;
pub mod resolver;
pub mod semsql;
pub mod source;

pub use locator::{AdapterLocator, DYNAMIC_LOCATOR, MERGED_ONTOLOGY};
pub use resolver::LabelResolver;
pub use semsql::{default_data_dir, SemsqlFactory, SemsqlSource};
pub use source::{LabelSource, OntologyError, SourceFactory};
