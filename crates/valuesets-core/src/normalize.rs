//! # Label Normalization
//!
//! Ontology labels and enum value names rarely agree on case or punctuation
//! (`T_CELL` vs `T cell`, `alpha-helix` vs `Alpha Helix`). Both sides are
//! normalized before comparison so that only substantive differences count
//! as mismatches.

/// Canonicalize a label for comparison.
///
/// Every character that is not an ASCII letter, ASCII digit or whitespace
/// becomes a space, whitespace runs collapse to a single space, the ends are
/// trimmed and the result is lowercased. Empty input yields an empty string.
///
/// ```
/// use valuesets_core::normalize;
/// assert_eq!(normalize("T-Cell!"), "t cell");
/// assert_eq!(normalize("  DNA__repair "), "dna repair");
/// ```
pub fn normalize(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
