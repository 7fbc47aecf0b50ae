//! Integration tests: loading schema files with local imports from disk.

use std::path::Path;

use valuesets_schema::{LoadedSchema, SchemaLoadError};

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn loads_transitive_imports_root_first() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "root.yaml",
        r#"
name: root
imports:
  - linkml:types
  - ./middle
enums:
  RootEnum:
    permissible_values:
      A:
"#,
    );
    write(
        dir.path(),
        "middle.yaml",
        r#"
name: middle
imports:
  - leaf.yaml
enums:
  MiddleEnum:
    permissible_values:
      B:
"#,
    );
    write(
        dir.path(),
        "leaf.yaml",
        r#"
name: leaf
enums:
  LeafEnum:
    permissible_values:
      C:
"#,
    );

    let schema = LoadedSchema::load(dir.path().join("root.yaml")).unwrap();
    assert_eq!(schema.root().name.as_deref(), Some("root"));
    assert_eq!(schema.documents().len(), 3);

    let names: Vec<&str> = schema.all_enums().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["RootEnum", "MiddleEnum", "LeafEnum"]);
}

#[test]
fn import_cycles_terminate() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.yaml",
        "imports: [./b]\nenums:\n  A:\n    permissible_values:\n      X:\n",
    );
    write(
        dir.path(),
        "b.yaml",
        "imports: [./a]\nenums:\n  B:\n    permissible_values:\n      Y:\n",
    );

    let schema = LoadedSchema::load(dir.path().join("a.yaml")).unwrap();
    assert_eq!(schema.documents().len(), 2);
    assert_eq!(schema.all_enums().len(), 2);
}

#[test]
fn root_definitions_shadow_imported_ones() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "root.yaml",
        "imports: [./core]\nenums:\n  Shared:\n    permissible_values:\n      ROOT_VALUE:\n",
    );
    write(
        dir.path(),
        "core.yaml",
        "enums:\n  Shared:\n    permissible_values:\n      CORE_VALUE:\n",
    );

    let schema = LoadedSchema::load(dir.path().join("root.yaml")).unwrap();
    let enums = schema.all_enums();
    assert_eq!(enums.len(), 1);
    assert!(enums[0].value("ROOT_VALUE").is_some());
}

#[test]
fn missing_import_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "root.yaml", "imports: [./nowhere]\n");

    let err = LoadedSchema::load(dir.path().join("root.yaml")).unwrap_err();
    assert!(matches!(err, SchemaLoadError::Io { .. }), "got {err}");
}

#[test]
fn remote_import_is_unresolvable() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "root.yaml",
        "imports: [https://w3id.org/linkml/valuesets/core]\n",
    );

    let err = LoadedSchema::load(dir.path().join("root.yaml")).unwrap_err();
    assert!(
        matches!(err, SchemaLoadError::UnresolvableImport { .. }),
        "got {err}"
    );
}

#[test]
fn missing_root_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LoadedSchema::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}
