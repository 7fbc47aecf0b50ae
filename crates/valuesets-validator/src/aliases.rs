//! Accepted textual forms of a permissible value.

use std::collections::BTreeSet;

use valuesets_core::PermissibleValue;

/// Annotation keys whose values count as alternative names.
pub const ALIAS_ANNOTATION_KEYS: [&str; 4] = ["label", "display_name", "preferred_name", "synonym"];

/// Every form an ontology label may take to count as a match for `value`.
///
/// Always contains `value_name`, then the title, plain aliases, structured
/// alias literal forms and the recognized annotation values.
pub fn extract_aliases(value: &PermissibleValue, value_name: &str) -> BTreeSet<String> {
    let mut aliases = BTreeSet::from([value_name.to_string()]);

    if let Some(title) = value.title.as_deref().filter(|t| !t.is_empty()) {
        aliases.insert(title.to_string());
    }

    aliases.extend(value.aliases.iter().cloned());

    aliases.extend(
        value
            .structured_aliases
            .iter()
            .filter_map(|a| a.literal_form.as_deref())
            .filter(|form| !form.is_empty())
            .map(str::to_string),
    );

    for key in ALIAS_ANNOTATION_KEYS {
        if let Some(text) = value.annotations.get(key).and_then(|a| a.text()) {
            aliases.insert(text.to_string());
        }
    }

    aliases
}
