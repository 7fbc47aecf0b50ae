//! Integration tests: the observable contract of enum and schema validation,
//! driven through an in-memory ontology.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use valuesets_core::{AnnotationValue, Curie, EnumDefinition, PermissibleValue};
use valuesets_ontology::{LabelSource, OntologyError, SourceFactory};
use valuesets_validator::{
    validate_files, EnumEvaluator, Reporter, Severity, Target, ValidationConfig,
};

/// Every label lookup that reached the ontology, in order.
type LookupLog = Rc<RefCell<Vec<String>>>;

struct MemoryOntology {
    labels: HashMap<String, String>,
    log: LookupLog,
}

impl LabelSource for MemoryOntology {
    fn label(&self, curie: &Curie) -> Result<Option<String>, OntologyError> {
        self.log.borrow_mut().push(curie.to_string());
        if curie.as_str().ends_with(":crash") {
            panic!("ontology crashed on {curie}");
        }
        if curie.as_str().ends_with(":raise") {
            return Err(OntologyError::Lookup {
                curie: curie.to_string(),
                reason: "backend exploded".to_string(),
            });
        }
        Ok(self.labels.get(curie.as_str()).cloned())
    }
}

/// Serves the same in-memory ontology for every prefix.
struct MemoryFactory {
    labels: HashMap<String, String>,
    log: LookupLog,
}

impl SourceFactory for MemoryFactory {
    fn open_ontology(&self, _name: &str) -> Result<Box<dyn LabelSource>, OntologyError> {
        Ok(Box::new(MemoryOntology {
            labels: self.labels.clone(),
            log: Rc::clone(&self.log),
        }))
    }

    fn open_file(&self, path: &Path) -> Result<Box<dyn LabelSource>, OntologyError> {
        self.open_ontology(&path.display().to_string())
    }
}

fn evaluator(labels: &[(&str, &str)], config: ValidationConfig) -> (EnumEvaluator, LookupLog) {
    let log = LookupLog::default();
    let factory = MemoryFactory {
        labels: labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        log: Rc::clone(&log),
    };
    let evaluator = EnumEvaluator::with_factory(config, Box::new(factory)).unwrap();
    (evaluator, log)
}

fn color(value: PermissibleValue) -> EnumDefinition {
    EnumDefinition::new("Color").with_value(value)
}

#[test]
fn exact_name_match_yields_no_issue() {
    let (mut ev, _) = evaluator(&[("X:1", "Red")], ValidationConfig::default());
    let def = color(PermissibleValue::new("RED").with_meaning("X:1"));
    let issues = ev.validate_enum(&def, "Color");
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn mismatch_is_a_warning() {
    let (mut ev, _) = evaluator(&[("X:1", "Crimson")], ValidationConfig::default());
    let def = color(PermissibleValue::new("RED").with_meaning("X:1"));
    let issues = ev.validate_enum(&def, "Color");

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.enum_name, "Color");
    assert_eq!(issue.value_name, "RED");
    assert_eq!(issue.meaning, Some(Curie::new("X:1")));
    assert_eq!(issue.expected_label.as_deref(), Some("RED"));
    assert_eq!(issue.actual_label.as_deref(), Some("Crimson"));
    assert_eq!(
        issue.message,
        "Ontology label mismatch: expected one of {'RED'}, got 'Crimson'"
    );
}

#[test]
fn mismatch_is_an_error_in_strict_mode() {
    let config = ValidationConfig::default().with_strict_mode(true);
    let (mut ev, _) = evaluator(&[("X:1", "Crimson")], config);
    let def = color(PermissibleValue::new("RED").with_meaning("X:1"));
    let issues = ev.validate_enum(&def, "Color");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
}

#[test]
fn unresolvable_label_is_info() {
    let (mut ev, _) = evaluator(&[], ValidationConfig::default());
    let def = color(PermissibleValue::new("RED").with_meaning("X:1"));
    let issues = ev.validate_enum(&def, "Color");

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.severity, Severity::Info);
    assert_eq!(issue.meaning, Some(Curie::new("X:1")));
    assert_eq!(issue.message, "Could not retrieve label for X:1");
    assert!(issue.expected_label.is_none());
    assert!(issue.actual_label.is_none());
}

#[test]
fn backend_failure_is_info() {
    let (mut ev, _) = evaluator(&[], ValidationConfig::default());
    let def = color(PermissibleValue::new("RED").with_meaning("X:raise"));
    let issues = ev.validate_enum(&def, "Color");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Info);
}

#[test]
fn unmapped_values_are_never_reported() {
    let (mut ev, log) = evaluator(&[], ValidationConfig::default().with_strict_mode(true));
    let def = EnumDefinition::new("Color")
        .with_value(PermissibleValue::new("RED").with_title("Something unrelated"))
        .with_value(PermissibleValue::new("BLUE").with_alias("azure"))
        .with_value(PermissibleValue::new("GREEN").with_meaning(""));

    assert!(ev.validate_enum(&def, "Color").is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn alias_match_suffices() {
    let (mut ev, _) = evaluator(
        &[
            ("CL:1", "T cell"),
            ("CL:2", "thymocyte-derived cell"),
            ("CL:3", "Natural killer cell"),
            ("CL:4", "B lymphocyte"),
            ("CL:5", "Macrophage"),
        ],
        ValidationConfig::default().with_strict_mode(true),
    );
    let def = EnumDefinition::new("CellType")
        .with_value(PermissibleValue::new("T_CELL").with_meaning("CL:1"))
        .with_value(
            PermissibleValue::new("THYMOCYTE")
                .with_meaning("CL:2")
                .with_structured_alias("thymocyte-derived cell"),
        )
        .with_value(
            PermissibleValue::new("NK")
                .with_meaning("CL:3")
                .with_title("Natural Killer Cell"),
        )
        .with_value(
            PermissibleValue::new("B")
                .with_meaning("CL:4")
                .with_alias("B-Lymphocyte"),
        )
        .with_value(
            PermissibleValue::new("MAC")
                .with_meaning("CL:5")
                .with_annotation(
                    "display_name",
                    AnnotationValue::Wrapped {
                        tag: Some("display_name".to_string()),
                        value: Some("macrophage".to_string()),
                    },
                ),
        );

    let issues = ev.validate_enum(&def, "CellType");
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn issues_follow_value_order() {
    let (mut ev, _) = evaluator(&[("X:2", "Wrong")], ValidationConfig::default());
    let def = EnumDefinition::new("Ordered")
        .with_value(PermissibleValue::new("ZULU").with_meaning("X:1"))
        .with_value(PermissibleValue::new("ALPHA").with_meaning("X:2"))
        .with_value(PermissibleValue::new("MIKE").with_meaning("X:3"));

    let names: Vec<String> = ev
        .validate_enum(&def, "Ordered")
        .into_iter()
        .map(|i| i.value_name)
        .collect();
    assert_eq!(names, ["ZULU", "ALPHA", "MIKE"]);
}

#[test]
fn shared_meaning_is_looked_up_once() {
    let (mut ev, log) = evaluator(&[("X:1", "Red")], ValidationConfig::default());
    let first = EnumDefinition::new("Color")
        .with_value(PermissibleValue::new("RED").with_meaning("X:1"))
        .with_value(PermissibleValue::new("ROUGE").with_meaning("X:1"));
    let second =
        EnumDefinition::new("Paint").with_value(PermissibleValue::new("RED").with_meaning("X:1"));

    ev.validate_enum(&first, "Color");
    ev.validate_enum(&second, "Paint");

    assert_eq!(*log.borrow(), ["X:1"]);
}

#[test]
fn disabling_cache_repeats_lookups() {
    let config = ValidationConfig::default().with_cache_labels(false);
    let (mut ev, log) = evaluator(&[("X:1", "Red")], config);
    let def = EnumDefinition::new("Color")
        .with_value(PermissibleValue::new("RED").with_meaning("X:1"))
        .with_value(PermissibleValue::new("ROUGE").with_meaning("X:1"));

    ev.validate_enum(&def, "Color");
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn unsupported_adapter_is_rejected_up_front() {
    let log = LookupLog::default();
    let factory = MemoryFactory {
        labels: HashMap::new(),
        log,
    };
    let config = ValidationConfig::default().with_adapter("bioportal:");
    let err = EnumEvaluator::with_factory(config, Box::new(factory)).unwrap_err();
    assert!(matches!(err, OntologyError::UnsupportedLocator(_)), "got {err}");
}

#[test]
fn schema_counters_and_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.yaml");
    std::fs::write(
        &path,
        r#"
name: colors
enums:
  Color:
    permissible_values:
      RED:
        meaning: X:1
      GREEN:
        meaning: X:2
      BLUE:
  Empty:
    description: no values at all
"#,
    )
    .unwrap();

    let labels = [("X:1", "Red"), ("X:2", "Lime")];
    let (mut ev, _) = evaluator(&labels, ValidationConfig::default());
    let result = ev.validate_schema(&path);

    assert_eq!(result.enums_checked(), 2);
    assert_eq!(result.values_checked(), 3);
    assert_eq!(result.mappings_checked(), 2);
    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.issues()[0].value_name, "GREEN");
    assert!(result.has_warnings());
    assert!(!result.has_errors());
    assert_eq!(result.schema_path(), Some(path.as_path()));
}

#[test]
fn schema_load_failure_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "enums: [this is: not: valid").unwrap();

    let (mut ev, _) = evaluator(&[], ValidationConfig::default());
    let result = ev.validate_schema(&path);

    assert_eq!(result.issues().len(), 1);
    let issue = &result.issues()[0];
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.enum_name, "<schema>");
    assert_eq!(issue.value_name, "<error>");
    assert!(issue.message.starts_with("Failed to validate schema: "));
    assert_eq!(result.enums_checked(), 0);
    assert_eq!(result.values_checked(), 0);
    assert_eq!(result.mappings_checked(), 0);
}

#[test]
fn empty_label_is_a_mismatch() {
    let (mut ev, _) = evaluator(&[("X:1", "")], ValidationConfig::default());
    let def = color(PermissibleValue::new("_").with_meaning("X:1"));
    let issues = ev.validate_enum(&def, "Color");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].actual_label.as_deref(), Some(""));
}

#[test]
fn panicking_schema_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let crashing = dir.path().join("a.yaml");
    let healthy = dir.path().join("b.yaml");
    std::fs::write(
        &crashing,
        "enums:\n  Color:\n    permissible_values:\n      RED:\n        meaning: X:crash\n",
    )
    .unwrap();
    std::fs::write(
        &healthy,
        "enums:\n  Color:\n    permissible_values:\n      RED:\n        meaning: X:1\n",
    )
    .unwrap();

    let config = ValidationConfig::default();
    let (mut ev, _) = evaluator(&[("X:1", "Red")], config.clone());
    let mut reporter = Reporter::from_config(Vec::new(), &config, false);
    let files = [crashing, healthy];

    let outcome = validate_files(&mut ev, &files, Target::Directory, &mut reporter).unwrap();

    assert_eq!(outcome.results.len(), 2);
    let failed = &outcome.results[0];
    assert_eq!(failed.issues().len(), 1);
    assert_eq!(failed.issues()[0].severity, Severity::Error);
    assert_eq!(failed.issues()[0].enum_name, "<schema>");
    assert_eq!(
        failed.issues()[0].message,
        "Failed to validate schema: ontology crashed on X:crash"
    );
    assert_eq!(failed.mappings_checked(), 0);

    let passed = &outcome.results[1];
    assert!(passed.issues().is_empty(), "{:?}", passed.issues());
    assert_eq!(passed.mappings_checked(), 1);
    assert_eq!(outcome.exit_code(false), 1);
}
