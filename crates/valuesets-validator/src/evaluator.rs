//! # Enum Evaluator
//!
//! Validates ontology mappings one enum or one schema at a time. The
//! evaluator owns the label resolver, so its cache spans every enum and
//! schema validated through the same instance.

use std::collections::BTreeSet;
use std::path::Path;

use valuesets_core::{normalize, EnumDefinition};
use valuesets_ontology::{LabelResolver, OntologyError, SemsqlFactory, SourceFactory};
use valuesets_schema::LoadedSchema;

use crate::aliases::extract_aliases;
use crate::config::ValidationConfig;
use crate::issue::{Severity, ValidationIssue, ValidationResult};

#[derive(Debug)]
pub struct EnumEvaluator {
    config: ValidationConfig,
    resolver: LabelResolver,
}

impl EnumEvaluator {
    /// Build an evaluator reading SemSQL databases from `config.data_dir`.
    ///
    /// # Errors
    ///
    /// `UnsupportedLocator` when `config.adapter` names no known backend.
    /// A backend that is known but cannot be opened is not an error; its
    /// lookups degrade to "no label".
    pub fn new(config: ValidationConfig) -> Result<Self, OntologyError> {
        let factory = SemsqlFactory::new(config.data_dir.clone());
        Self::with_factory(config, Box::new(factory))
    }

    /// Build an evaluator over a custom source factory.
    pub fn with_factory(
        config: ValidationConfig,
        factory: Box<dyn SourceFactory>,
    ) -> Result<Self, OntologyError> {
        let locator = config.locator()?;
        let resolver = LabelResolver::new(&locator, factory, config.cache_labels);
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn resolver(&self) -> &LabelResolver {
        &self.resolver
    }

    /// Severity given to label mismatches under the current configuration.
    fn mismatch_severity(&self) -> Severity {
        if self.config.strict_mode {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Validate every mapped value of one enum, in value order.
    pub fn validate_enum(
        &mut self,
        def: &EnumDefinition,
        enum_name: &str,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for value in def.values() {
            let Some(meaning) = value.mapped_meaning() else {
                continue;
            };
            let value_name = value.name.as_str();

            let actual_label = self.resolver.label_for(meaning);
            let expected = extract_aliases(value, value_name);
            let normalized_expected: BTreeSet<String> =
                expected.iter().map(|label| normalize(label)).collect();

            match actual_label {
                None => {
                    tracing::info!(enum_name, value_name, %meaning, "could not retrieve label");
                    issues.push(ValidationIssue::unresolved(enum_name, value_name, meaning));
                }
                Some(actual) if !label_matches(&actual, &normalized_expected) => {
                    tracing::info!(
                        enum_name,
                        value_name,
                        %meaning,
                        actual = %actual,
                        "label mismatch"
                    );
                    issues.push(ValidationIssue::mismatch(
                        enum_name,
                        value_name,
                        meaning,
                        &expected,
                        &actual,
                        self.mismatch_severity(),
                    ));
                }
                Some(_) => {}
            }
        }

        issues
    }

    /// Load a schema and validate every enum it defines or imports.
    ///
    /// A schema that cannot be loaded yields a result holding a single
    /// schema-failure error and zero counters.
    pub fn validate_schema(&mut self, schema_path: &Path) -> ValidationResult {
        let schema = match LoadedSchema::load(schema_path) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::warn!(
                    path = %schema_path.display(),
                    error = %e,
                    "error validating schema"
                );
                return ValidationResult::failed(schema_path, e);
            }
        };

        let mut result = ValidationResult::new(schema_path);
        for def in schema.all_enums() {
            result.record_enum(def.len(), def.mapped_count());
            if def.is_empty() {
                continue;
            }
            let issues = self.validate_enum(def, &def.name);
            result.extend(issues);
        }

        tracing::info!(
            path = %schema_path.display(),
            enums = result.enums_checked(),
            values = result.values_checked(),
            mappings = result.mappings_checked(),
            issues = result.issues().len(),
            "validated schema"
        );
        result
    }
}

/// An empty label never matches, even a value name made only of punctuation.
fn label_matches(actual: &str, normalized_expected: &BTreeSet<String>) -> bool {
    !actual.is_empty() && normalized_expected.contains(&normalize(actual))
}
