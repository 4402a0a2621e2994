//! Term normalization for the tsquery syntax.

/// Escape literal spaces in a raw search term.
///
/// Each space becomes `\ ` so the term survives embedding inside a
/// tsquery expression as a single token. Nothing else is altered.
///
/// Not idempotent: normalizing twice double-escapes. Callers normalize
/// exactly once per term, at spec-flattening time.
pub fn normalize_term(term: &str) -> String {
    term.replace(' ', "\\ ")
}
