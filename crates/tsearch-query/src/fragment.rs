//! Rank/match SQL fragment generation.
//!
//! Every flattened triple yields one `FragmentPair`: a `ts_rank(...)`
//! expression contributing to the relevance score, and a `@@` predicate
//! for the WHERE clause. Plain and advanced matching differ only in the
//! tsquery parsing function, so one parameterized builder serves both.

use serde::{Deserialize, Serialize};

use crate::spec::Triple;

/// Term-parsing mode for the generated tsquery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Permissive free-text parsing (`plainto_tsquery`).
    Plain,
    /// Operator-aware parsing supporting `&`, `|`, `!`, prefix matches
    /// (`to_tsquery`).
    Advanced,
}

impl MatchMode {
    /// The tsquery parsing function for this mode.
    pub fn tsquery_fn(self) -> &'static str {
        match self {
            MatchMode::Plain => "plainto_tsquery",
            MatchMode::Advanced => "to_tsquery",
        }
    }
}

/// Paired rank and match expressions derived from one triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentPair {
    /// `ts_rank(...)` — real-valued rank contribution.
    pub similarity: String,
    /// `to_tsvector(...) @@ ...` — boolean match predicate.
    pub condition: String,
}

/// Build the fragment pair for one triple.
///
/// `language` is the already-quoted search configuration (e.g. `'english'`),
/// quoted once per model and reused across every fragment.
pub fn build_fragment(triple: &Triple, mode: MatchMode, language: &str) -> FragmentPair {
    let vector = format!(
        "to_tsvector({}, {}.{}::text)",
        language, triple.table, triple.column
    );
    let query = format!("{}({}, {}::text)", mode.tsquery_fn(), language, triple.term);

    FragmentPair {
        similarity: format!("ts_rank({}, {})", vector, query),
        condition: format!("{} @@ {}", vector, query),
    }
}

/// Build fragment pairs for a flattened spec, preserving triple order.
pub fn build_fragments(triples: &[Triple], mode: MatchMode, language: &str) -> Vec<FragmentPair> {
    triples
        .iter()
        .map(|triple| build_fragment(triple, mode, language))
        .collect()
}
