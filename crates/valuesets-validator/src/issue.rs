//! # Validation Issues and Results
//!
//! Issues are immutable findings; a result accumulates them for one schema
//! along with how much was checked. Nothing is ever removed from a result.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use valuesets_core::Curie;

/// Enum name recorded on the issue produced when a whole schema fails.
pub const SCHEMA_FAILURE_ENUM: &str = "<schema>";
/// Value name recorded on the issue produced when a whole schema fails.
pub const SCHEMA_FAILURE_VALUE: &str = "<error>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding about one permissible value (or about a whole schema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub enum_name: String,
    pub value_name: String,
    pub severity: Severity,
    pub message: String,
    /// The CURIE involved, if any.
    pub meaning: Option<Curie>,
    pub expected_label: Option<String>,
    pub actual_label: Option<String>,
}

impl ValidationIssue {
    /// The ontology returned no label for `meaning`.
    pub fn unresolved(enum_name: &str, value_name: &str, meaning: &Curie) -> Self {
        Self {
            enum_name: enum_name.to_string(),
            value_name: value_name.to_string(),
            severity: Severity::Info,
            message: format!("Could not retrieve label for {meaning}"),
            meaning: Some(meaning.clone()),
            expected_label: None,
            actual_label: None,
        }
    }

    /// The ontology label matches none of the value's accepted forms.
    pub fn mismatch(
        enum_name: &str,
        value_name: &str,
        meaning: &Curie,
        expected: &BTreeSet<String>,
        actual: &str,
        severity: Severity,
    ) -> Self {
        let expected_list = expected
            .iter()
            .map(|label| format!("'{label}'"))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            enum_name: enum_name.to_string(),
            value_name: value_name.to_string(),
            severity,
            message: format!(
                "Ontology label mismatch: expected one of {{{expected_list}}}, got '{actual}'"
            ),
            meaning: Some(meaning.clone()),
            expected_label: Some(value_name.to_string()),
            actual_label: Some(actual.to_string()),
        }
    }

    /// The schema could not be validated at all.
    pub fn schema_failure(reason: impl fmt::Display) -> Self {
        Self {
            enum_name: SCHEMA_FAILURE_ENUM.to_string(),
            value_name: SCHEMA_FAILURE_VALUE.to_string(),
            severity: Severity::Error,
            message: format!("Failed to validate schema: {reason}"),
            meaning: None,
            expected_label: None,
            actual_label: None,
        }
    }
}

/// Outcome of validating one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    schema_path: Option<PathBuf>,
    issues: Vec<ValidationIssue>,
    enums_checked: usize,
    values_checked: usize,
    mappings_checked: usize,
}

impl ValidationResult {
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: Some(schema_path.into()),
            ..Self::default()
        }
    }

    /// A result carrying only the synthetic schema-failure error.
    pub fn failed(schema_path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        let mut result = Self::new(schema_path);
        result.push(ValidationIssue::schema_failure(reason));
        result
    }

    pub fn schema_path(&self) -> Option<&Path> {
        self.schema_path.as_deref()
    }

    /// File name of the schema, for compact listings.
    pub fn schema_name(&self) -> String {
        self.schema_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    /// Record one enum: `values` permissible values, `mappings` of them mapped.
    pub fn record_enum(&mut self, values: usize, mappings: usize) {
        self.enums_checked += 1;
        self.values_checked += values;
        self.mappings_checked += mappings;
    }

    pub fn enums_checked(&self) -> usize {
        self.enums_checked
    }

    pub fn values_checked(&self) -> usize {
        self.values_checked
    }

    pub fn mappings_checked(&self) -> usize {
        self.mappings_checked
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.with_severity(Severity::Warning).next().is_some()
    }
}
