//! # Schema Loader
//!
//! Reads LinkML YAML documents and extracts their enum definitions.
//!
//! ## Accepted Shapes
//!
//! ```yaml
//! id: https://w3id.org/linkml/valuesets/bio
//! name: bio
//! imports:
//!   - linkml:types
//!   - ./core
//! enums:
//!   CellType:
//!     description: Cell types
//!     permissible_values:
//!       T_CELL:
//!         title: T cell
//!         meaning: CL:0000084
//!         aliases: [T lymphocyte]
//!         structured_aliases:
//!           - literal_form: thymocyte-derived cell
//!         annotations:
//!           display_name: T-Cell
//!           preferred_name:
//!             tag: preferred_name
//!             value: T cell
//!       UNKNOWN:
//! ```
//!
//! A permissible value may be written with no body at all (`UNKNOWN:`).
//! `permissible_values` may also be a list of bare names and bodies that
//! carry their name as `text`. `aliases` and `structured_aliases` accept a
//! single item in place of a list.
//! Mapping keys that YAML parses as numbers or booleans are rendered back to
//! their textual form.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use valuesets_core::{AnnotationValue, Curie, EnumDefinition, PermissibleValue, StructuredAlias};

/// Import prefix naming the LinkML metamodel. Never loaded from disk.
const METAMODEL_IMPORT_PREFIX: &str = "linkml:";

/// Error while loading a schema or one of its imports.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("cannot read schema '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in '{path}': {reason}")]
    InvalidYaml { path: String, reason: String },

    /// The document parsed but does not have the shape of a schema.
    #[error("malformed schema '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// An import names something that is neither the metamodel nor a local file.
    #[error("unresolvable import '{import}' in '{path}'")]
    UnresolvableImport { path: String, import: String },
}

/// One parsed schema file.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Where the document was read from.
    pub path: PathBuf,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Imports exactly as written.
    pub imports: Vec<String>,
    /// Enums in source order.
    pub enums: Vec<EnumDefinition>,
}

/// A root schema together with every schema it imports, transitively.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// Root first, then imports in depth-first declaration order.
    documents: Vec<SchemaDocument>,
}

impl LoadedSchema {
    /// Load `path` and its local import closure.
    ///
    /// # Errors
    ///
    /// Fails if any document in the closure cannot be read or parsed, or if
    /// an import cannot be resolved to a local file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let mut documents = Vec::new();
        let mut seen = HashSet::new();
        load_recursive(path.as_ref(), &mut documents, &mut seen)?;
        Ok(Self { documents })
    }

    /// The schema the load started from.
    pub fn root(&self) -> &SchemaDocument {
        &self.documents[0]
    }

    /// Every document in the import closure, root first.
    pub fn documents(&self) -> &[SchemaDocument] {
        &self.documents
    }

    /// Every enum visible from the root schema.
    ///
    /// Root definitions come first; an imported enum whose name is already
    /// defined closer to the root is shadowed.
    pub fn all_enums(&self) -> Vec<&EnumDefinition> {
        let mut names = HashSet::new();
        self.documents
            .iter()
            .flat_map(|doc| doc.enums.iter())
            .filter(|def| names.insert(def.name.as_str()))
            .collect()
    }
}

fn load_recursive(
    path: &Path,
    documents: &mut Vec<SchemaDocument>,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), SchemaLoadError> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !seen.insert(key) {
        return Ok(());
    }

    let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = parse_document(path, &content)?;
    tracing::debug!(
        path = %path.display(),
        enums = document.enums.len(),
        imports = document.imports.len(),
        "parsed schema document"
    );

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let imports = document.imports.clone();
    documents.push(document);

    for import in &imports {
        if import.starts_with(METAMODEL_IMPORT_PREFIX) {
            continue;
        }
        let import_path = resolve_import(base_dir, import).ok_or_else(|| {
            SchemaLoadError::UnresolvableImport {
                path: path.display().to_string(),
                import: import.clone(),
            }
        })?;
        load_recursive(&import_path, documents, seen)?;
    }

    Ok(())
}

/// Map an import to a file relative to the importing schema's directory.
///
/// Returns `None` for URLs and prefixed identifiers, which cannot be read
/// from the local filesystem.
fn resolve_import(base_dir: &Path, import: &str) -> Option<PathBuf> {
    if import.contains(':') {
        return None;
    }
    let file = if import.ends_with(".yaml") || import.ends_with(".yml") {
        import.to_string()
    } else {
        format!("{import}.yaml")
    };
    Some(base_dir.join(file))
}

#[derive(Deserialize)]
struct RawSchema {
    id: Option<String>,
    name: Option<String>,
    imports: Option<Vec<String>>,
    enums: Option<Mapping>,
}

#[derive(Deserialize)]
struct RawEnum {
    description: Option<String>,
    /// A mapping keyed by value name, or a list of names and `{text: ..}` bodies.
    permissible_values: Option<Value>,
}

#[derive(Deserialize)]
struct RawValue {
    title: Option<String>,
    description: Option<String>,
    meaning: Option<Curie>,
    aliases: Option<OneOrMany<String>>,
    structured_aliases: Option<OneOrMany<RawStructuredAlias>>,
    annotations: Option<Mapping>,
}

/// A multivalued slot written either as a list or as its single item.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
struct RawStructuredAlias {
    literal_form: Option<String>,
}

/// Parse one schema document from its text. Imports are recorded, not followed.
///
/// # Errors
///
/// Returns `InvalidYaml` when the text is not YAML and `Malformed` when the
/// YAML does not have the shape of a LinkML schema.
pub fn parse_document(path: &Path, content: &str) -> Result<SchemaDocument, SchemaLoadError> {
    let display = path.display().to_string();
    let malformed = |reason: String| SchemaLoadError::Malformed {
        path: display.clone(),
        reason,
    };

    let value: Value =
        serde_yaml::from_str(content).map_err(|e| SchemaLoadError::InvalidYaml {
            path: display.clone(),
            reason: e.to_string(),
        })?;
    if !value.is_mapping() {
        return Err(malformed("top level is not a mapping".to_string()));
    }

    let raw: RawSchema =
        serde_yaml::from_value(value).map_err(|e| malformed(e.to_string()))?;

    let mut enums = Vec::new();
    for (key, body) in raw.enums.unwrap_or_default() {
        let enum_name = scalar_text(&key)
            .ok_or_else(|| malformed(format!("enum key {key:?} is not a scalar")))?;
        let def = parse_enum(&enum_name, body)
            .map_err(|reason| malformed(format!("enum '{enum_name}': {reason}")))?;
        enums.push(def);
    }

    Ok(SchemaDocument {
        path: path.to_path_buf(),
        id: raw.id,
        name: raw.name,
        imports: raw.imports.unwrap_or_default(),
        enums,
    })
}

fn parse_enum(enum_name: &str, body: Value) -> Result<EnumDefinition, String> {
    let mut def = EnumDefinition::new(enum_name);
    if body.is_null() {
        return Ok(def);
    }

    let raw: RawEnum = serde_yaml::from_value(body).map_err(|e| e.to_string())?;
    def.description = raw.description;

    for (value_name, body) in value_entries(raw.permissible_values.unwrap_or(Value::Null))? {
        let value = parse_value(&value_name, body)
            .map_err(|reason| format!("value '{value_name}': {reason}"))?;
        def.push_value(value);
    }

    Ok(def)
}

/// Split `permissible_values` into `(name, body)` pairs in source order.
///
/// The mapping form keys bodies by name. The list form holds bare names or
/// bodies naming themselves with `text`.
fn value_entries(values: Value) -> Result<Vec<(String, Value)>, String> {
    match values {
        Value::Null => Ok(Vec::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, body)| {
                scalar_text(&key)
                    .map(|name| (name, body))
                    .ok_or_else(|| format!("value key {key:?} is not a scalar"))
            })
            .collect(),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Mapping(ref map) => map
                    .get("text")
                    .and_then(scalar_text)
                    .map(|name| (name, item.clone()))
                    .ok_or_else(|| "list entry has no `text`".to_string()),
                other => scalar_text(&other)
                    .map(|name| (name, Value::Null))
                    .ok_or_else(|| format!("list entry {other:?} is not a value")),
            })
            .collect(),
        other => Err(format!(
            "permissible_values {other:?} is neither a mapping nor a list"
        )),
    }
}

fn parse_value(value_name: &str, body: Value) -> Result<PermissibleValue, String> {
    let mut value = PermissibleValue::new(value_name);
    if body.is_null() {
        return Ok(value);
    }

    let raw: RawValue = serde_yaml::from_value(body).map_err(|e| e.to_string())?;
    value.title = raw.title;
    value.description = raw.description;
    value.meaning = raw.meaning;
    value.aliases = raw.aliases.map(OneOrMany::into_vec).unwrap_or_default();
    value.structured_aliases = raw
        .structured_aliases
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|a| StructuredAlias {
            literal_form: a.literal_form,
        })
        .collect();

    for (key, annotation) in raw.annotations.unwrap_or_default() {
        let Some(key) = scalar_text(&key) else {
            continue;
        };
        if let Some(annotation) = annotation_value(&annotation) {
            value.annotations.insert(key, annotation);
        }
    }

    Ok(value)
}

fn annotation_value(value: &Value) -> Option<AnnotationValue> {
    match value {
        Value::Null => None,
        Value::Mapping(map) => match map.get("value") {
            Some(inner) => Some(AnnotationValue::Wrapped {
                tag: map.get("tag").and_then(scalar_text),
                value: scalar_text(inner),
            }),
            None => Some(AnnotationValue::Structured),
        },
        Value::Sequence(_) => Some(AnnotationValue::Structured),
        Value::Tagged(tagged) => annotation_value(&tagged.value),
        scalar => scalar_text(scalar).map(AnnotationValue::Scalar),
    }
}

/// Render a YAML scalar as text. Non-scalars yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
