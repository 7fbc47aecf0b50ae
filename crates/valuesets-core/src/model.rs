//! # Enum Definitions
//!
//! Read-only views of controlled-vocabulary enumerations. The schema loader
//! builds these once; the validator walks them without mutation.
//!
//! Permissible values keep the order in which they were written in the
//! source schema so that reported issues are reproducible run to run.

use std::collections::BTreeMap;

use crate::curie::Curie;

/// A synonym record attached to a permissible value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredAlias {
    /// The synonym text. Absent when the record carries only metadata.
    pub literal_form: Option<String>,
}

impl StructuredAlias {
    /// Build a structured alias with the given literal form.
    pub fn new(literal_form: impl Into<String>) -> Self {
        Self {
            literal_form: Some(literal_form.into()),
        }
    }
}

/// The value stored under one annotation key.
///
/// Schemas write annotations either as a bare scalar (`label: Heart`) or as a
/// wrapper record (`label: {tag: label, value: Heart}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// A bare scalar, already rendered as text.
    Scalar(String),
    /// A `{tag, value}` wrapper.
    Wrapped {
        /// The wrapper's tag, if written.
        tag: Option<String>,
        /// The wrapped scalar rendered as text, if written.
        value: Option<String>,
    },
    /// Anything else (lists, nested maps). Never used as alias text.
    Structured,
}

impl AnnotationValue {
    /// The textual form, unwrapping a `{tag, value}` wrapper one level.
    ///
    /// Empty strings count as absent.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Self::Scalar(s) => Some(s.as_str()),
            Self::Wrapped { value, .. } => value.as_deref(),
            Self::Structured => None,
        };
        text.filter(|s| !s.is_empty())
    }
}

/// One named member of an enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissibleValue {
    /// Key of the value within its enum. Always present.
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// The ontology term this value is declared to mean.
    pub meaning: Option<Curie>,
    pub aliases: Vec<String>,
    pub structured_aliases: Vec<StructuredAlias>,
    pub annotations: BTreeMap<String, AnnotationValue>,
}

impl PermissibleValue {
    /// Create a value with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<Curie>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_structured_alias(mut self, literal_form: impl Into<String>) -> Self {
        self.structured_aliases
            .push(StructuredAlias::new(literal_form));
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: AnnotationValue) -> Self {
        self.annotations.insert(key.into(), value);
        self
    }

    /// The declared mapping, treating an empty identifier as no mapping.
    pub fn mapped_meaning(&self) -> Option<&Curie> {
        self.meaning.as_ref().filter(|m| !m.is_empty())
    }
}

/// A named enumeration and its permissible values, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDefinition {
    pub name: String,
    pub description: Option<String>,
    permissible_values: Vec<PermissibleValue>,
}

impl EnumDefinition {
    /// Create an enum with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a value. A value with the same name replaces the earlier one
    /// in place, keeping names unique within the enum.
    pub fn with_value(mut self, value: PermissibleValue) -> Self {
        self.push_value(value);
        self
    }

    /// In-place form of [`with_value`](Self::with_value).
    pub fn push_value(&mut self, value: PermissibleValue) {
        match self
            .permissible_values
            .iter_mut()
            .find(|existing| existing.name == value.name)
        {
            Some(existing) => *existing = value,
            None => self.permissible_values.push(value),
        }
    }

    /// Values in source order.
    pub fn values(&self) -> &[PermissibleValue] {
        &self.permissible_values
    }

    /// Look up a value by name.
    pub fn value(&self, name: &str) -> Option<&PermissibleValue> {
        self.permissible_values.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.permissible_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissible_values.is_empty()
    }

    /// Number of values carrying a non-empty `meaning`.
    pub fn mapped_count(&self) -> usize {
        self.permissible_values
            .iter()
            .filter(|v| v.mapped_meaning().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_scalar_text() {
        let value = AnnotationValue::Scalar("Heart".to_string());
        assert_eq!(value.text(), Some("Heart"));
    }

    #[test]
    fn annotation_wrapper_unwraps_one_level() {
        let value = AnnotationValue::Wrapped {
            tag: Some("label".to_string()),
            value: Some("Heart".to_string()),
        };
        assert_eq!(value.text(), Some("Heart"));
    }

    #[test]
    fn annotation_empty_text_is_absent() {
        assert_eq!(AnnotationValue::Scalar(String::new()).text(), None);
        let wrapped = AnnotationValue::Wrapped {
            tag: None,
            value: None,
        };
        assert_eq!(wrapped.text(), None);
        assert_eq!(AnnotationValue::Structured.text(), None);
    }

    #[test]
    fn empty_meaning_is_not_a_mapping() {
        let value = PermissibleValue::new("EMPTY").with_meaning("");
        assert!(value.mapped_meaning().is_none());
    }

    #[test]
    fn enum_preserves_insertion_order() {
        let def = EnumDefinition::new("Color")
            .with_value(PermissibleValue::new("RED"))
            .with_value(PermissibleValue::new("GREEN"))
            .with_value(PermissibleValue::new("BLUE"));
        let names: Vec<&str> = def.values().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn duplicate_value_name_replaces_in_place() {
        let def = EnumDefinition::new("Color")
            .with_value(PermissibleValue::new("RED"))
            .with_value(PermissibleValue::new("BLUE"))
            .with_value(PermissibleValue::new("RED").with_meaning("X:1"));
        assert_eq!(def.len(), 2);
        assert_eq!(def.values()[0].name, "RED");
        assert!(def.values()[0].mapped_meaning().is_some());
    }

    #[test]
    fn mapped_count_skips_unmapped_and_empty() {
        let def = EnumDefinition::new("Mixed")
            .with_value(PermissibleValue::new("A").with_meaning("X:1"))
            .with_value(PermissibleValue::new("B"))
            .with_value(PermissibleValue::new("C").with_meaning(""));
        assert_eq!(def.mapped_count(), 1);
        assert!(def.value("B").is_some());
    }
}
