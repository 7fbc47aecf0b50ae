//! # valuesets-validator — Ontology Mapping Validation
//!
//! Checks that every permissible value mapped to an ontology term (its
//! `meaning`) agrees with the label the ontology asserts for that term.
//!
//! ## Flow
//!
//! ```text
//! batch ──▶ EnumEvaluator::validate_schema ──▶ EnumEvaluator::validate_enum
//!                                                 ├─▶ aliases::extract_aliases
//!                                                 └─▶ LabelResolver::label_for ─▶ normalize
//! ```
//!
//! - [`aliases`] — every textual form a value accepts as a match.
//! - [`evaluator`] — per-enum and per-schema validation.
//! - [`batch`] — schema file discovery and failure-isolated batch runs.
//! - [`report`] — console rendering and exit status.
//!
//! ## Outcomes
//!
//! | Situation                               | Issue                        |
//! |-----------------------------------------|------------------------------|
//! | no `meaning`                            | none                         |
//! | label matches name/title/alias          | none                         |
//! | label could not be retrieved            | INFO                         |
//! | label matches nothing                   | WARNING (ERROR when strict)  |
//! | schema could not be loaded              | one ERROR for the schema     |

pub mod aliases;
pub mod batch;
pub mod config;
pub mod evaluator;
pub mod issue;
pub mod report;

pub use aliases::{extract_aliases, ALIAS_ANNOTATION_KEYS};
pub use batch::{discover_schema_files, validate_files, BatchOutcome, EXCLUDED_PATH_COMPONENT};
pub use config::{ValidationConfig, DEFAULT_WARNING_LIMIT};
pub use evaluator::EnumEvaluator;
pub use issue::{Severity, ValidationIssue, ValidationResult};
pub use report::{Reporter, Target};
