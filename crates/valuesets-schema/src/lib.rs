//! # valuesets-schema — LinkML Schema Loading
//!
//! Turns LinkML YAML schema files into the read-only enum views defined in
//! `valuesets-core`. Only the parts of the metamodel the validator needs are
//! read: schema identity, `imports`, and `enums` with their permissible
//! values. Classes, slots, types and prefixes are ignored.
//!
//! ## Loading
//!
//! - [`LoadedSchema::load`] — parse a schema file and every local schema it
//!   imports, transitively. `linkml:` imports name the metamodel itself and
//!   are skipped.
//! - [`LoadedSchema::all_enums`] — every enum visible from the root schema,
//!   root definitions first.
//!
//! ## Crate Policy
//!
//! - Depends only on `valuesets-core` internally.
//! - Loading is all-or-nothing: a malformed enum anywhere in the import
//!   closure fails the whole load with a [`SchemaLoadError`] naming the file.

pub mod loader;

pub use loader::{parse_document, LoadedSchema, SchemaDocument, SchemaLoadError};
