//! Search specifications and their flattening into query triples.
//!
//! A `SearchSpec` maps column names to search terms. A key may instead
//! name a related table and carry a nested spec, which searches that
//! table's columns. Flattening walks the spec depth-first, in insertion
//! order, producing one `Triple` per leaf term with all identifiers and
//! literals already quoted.

use serde::{Deserialize, Serialize};
use tracing::trace;

use tsearch_core::{Error, Quoting, Result};

use crate::normalize::normalize_term;

/// A value in a search specification: a literal term, or a nested spec
/// scoped to a related table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecValue {
    Term(String),
    Nested(SearchSpec),
}

impl From<&str> for SpecValue {
    fn from(term: &str) -> Self {
        SpecValue::Term(term.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(term: String) -> Self {
        SpecValue::Term(term)
    }
}

impl From<SearchSpec> for SpecValue {
    fn from(spec: SearchSpec) -> Self {
        SpecValue::Nested(spec)
    }
}

/// An ordered column→term (or table→nested-spec) mapping.
///
/// Keys are unique per level; inserting an existing key replaces its
/// value in place. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    entries: Vec<(String, SpecValue)>,
}

impl SearchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, preserving the position of a replaced key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SpecValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style `insert` for a literal term.
    pub fn term(mut self, column: impl Into<String>, term: impl Into<String>) -> Self {
        self.insert(column, SpecValue::Term(term.into()));
        self
    }

    /// Builder-style `insert` for a nested, related-table spec.
    pub fn nested(mut self, table: impl Into<String>, spec: SearchSpec) -> Self {
        self.insert(table, SpecValue::Nested(spec));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpecValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply a transformation to every leaf term, recursively.
    ///
    /// Used for caller-supplied term filters that run before the
    /// escaping normalizer.
    pub fn map_terms(&self, f: &dyn Fn(&str) -> String) -> SearchSpec {
        let entries = self
            .entries
            .iter()
            .map(|(k, v)| {
                let mapped = match v {
                    SpecValue::Term(t) => SpecValue::Term(f(t)),
                    SpecValue::Nested(inner) => SpecValue::Nested(inner.map_terms(f)),
                };
                (k.clone(), mapped)
            })
            .collect();
        SearchSpec { entries }
    }
}

impl TryFrom<serde_json::Value> for SearchSpec {
    type Error = Error;

    /// Convert a JSON object into a spec. String values become terms,
    /// object values become nested specs; anything else is rejected.
    /// Key order is preserved (serde_json's `preserve_order` feature).
    fn try_from(value: serde_json::Value) -> Result<SearchSpec> {
        let serde_json::Value::Object(map) = value else {
            return Err(Error::InvalidInput(
                "search specification must be a JSON object".to_string(),
            ));
        };

        let mut spec = SearchSpec::new();
        for (key, value) in map {
            match value {
                serde_json::Value::String(term) => spec.insert(key, SpecValue::Term(term)),
                nested @ serde_json::Value::Object(_) => {
                    spec.insert(key, SpecValue::Nested(SearchSpec::try_from(nested)?))
                }
                other => {
                    return Err(Error::InvalidInput(format!(
                        "search term for {} must be a string or object, got {}",
                        key, other
                    )))
                }
            }
        }
        Ok(spec)
    }
}

/// One fully resolved unit of search: quoted table, quoted column,
/// quoted and normalized term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub table: String,
    pub column: String,
    pub term: String,
}

/// Flatten a spec into triples, depth-first, in insertion order.
///
/// `table` is the current (unquoted) table context; a nested entry
/// recurses with its key as the new context. Terms are normalized
/// exactly once here, then literal-quoted. Column existence is not
/// validated; an invalid column surfaces when the assembled query runs.
pub fn parse_spec(spec: &SearchSpec, table: &str, quoting: &dyn Quoting) -> Vec<Triple> {
    let quoted_table = quoting.quote_table(table);
    let mut triples = Vec::new();

    for (key, value) in spec.iter() {
        match value {
            SpecValue::Nested(inner) => {
                triples.extend(parse_spec(inner, key, quoting));
            }
            SpecValue::Term(term) => {
                let triple = Triple {
                    table: quoted_table.clone(),
                    column: quoting.quote_identifier(key),
                    term: quoting.quote_literal(&normalize_term(term)),
                };
                trace!(
                    table = %triple.table,
                    column = %triple.column,
                    "flattened spec entry"
                );
                triples.push(triple);
            }
        }
    }

    triples
}
