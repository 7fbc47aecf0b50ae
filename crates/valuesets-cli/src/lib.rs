//! # valuesets-cli — Enum Mapping Validator
//!
//! Provides the `validate-enums` command: point it at a LinkML schema file
//! or a directory of schemas and it checks every permissible value's
//! `meaning` against the ontology label.
//!
//! ```bash
//! validate-enums src/valuesets/schema/bio/cell_types.yaml
//! validate-enums src/valuesets/schema --strict -v
//! validate-enums schema.yaml --adapter sqlite:obo:cl --no-cache
//! ```

pub mod validate;
