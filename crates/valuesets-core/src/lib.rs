//! # valuesets-core — Foundational Types
//!
//! Shared vocabulary for the valuesets validator crates. Everything here is
//! plain data plus pure functions; no I/O happens in this crate.
//!
//! ## Modules
//!
//! - [`model`] — read-only views of enum definitions and their permissible
//!   values, as produced by the schema loader.
//! - [`curie`] — the compact identifier newtype used for ontology mappings.
//! - [`normalize`] — label canonicalization for case- and
//!   punctuation-insensitive comparison.
//!
//! ## Crate Policy
//!
//! - No internal dependencies. Every other crate in the workspace depends
//!   on this one.
//! - Types are immutable once built by the loader; validators only read them.

pub mod curie;
pub mod model;
pub mod normalize;

pub use curie::Curie;
pub use model::{AnnotationValue, EnumDefinition, PermissibleValue, StructuredAlias};
pub use normalize::normalize;
