//! Dynamic search-method resolution.
//!
//! Method names of the form `search_by_<columns>` resolve to a column
//! list and an exclusivity: `search_by_title_and_body` searches both
//! columns conjunctively, `search_by_title_or_body` disjunctively. The
//! column tokens must all be textual columns of the model's table.
//!
//! Resolution is an explicit registry rather than call-time reflection:
//! the first successful match for a name caches a `DynamicMethodEntry`,
//! and later calls skip the pattern/column check entirely. Redundant
//! concurrent resolution is harmless; the entry is a pure function of
//! the name and the column set, so last-writer-wins is idempotent.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use tsearch_core::TableMeta;

static SEARCH_BY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^search_by_([_a-zA-Z]\w*)$").expect("valid search_by pattern"));

/// A resolved dynamic method: the columns it searches and how their
/// conditions combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicMethodEntry {
    pub columns: Vec<String>,
    pub exclusive: bool,
}

/// Per-model cache of resolved dynamic method names.
///
/// Entries are created lazily on first successful resolution and never
/// evicted. Failed resolutions cache nothing, so a name can start
/// resolving once the schema gains the columns it mentions.
#[derive(Debug, Default)]
pub struct DynamicMethodRegistry {
    resolved: RwLock<HashMap<String, DynamicMethodEntry>>,
}

impl DynamicMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` against the table's textual columns, serving from
    /// the cache after the first successful match.
    pub fn resolve(&self, name: &str, meta: &TableMeta) -> Option<DynamicMethodEntry> {
        if let Some(entry) = self
            .resolved
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
        {
            return Some(entry.clone());
        }

        let entry = match_name(name, meta)?;
        debug!(
            method_name = name,
            column_count = entry.columns.len(),
            exclusive = entry.exclusive,
            "resolved dynamic search method"
        );
        self.resolved
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), entry.clone());
        Some(entry)
    }

    /// Whether `name` has already been resolved and cached.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(name)
    }

    /// Introspection companion to [`resolve`]: same pattern and column
    /// check, no cache read or write.
    ///
    /// [`resolve`]: DynamicMethodRegistry::resolve
    pub fn responds_to(name: &str, meta: &TableMeta) -> bool {
        match_name(name, meta).is_some()
    }
}

/// Match a method name against the two naming grammars.
///
/// The exclusive (`_and_`) split is tried first; a single-column name
/// matches as exclusive.
fn match_name(name: &str, meta: &TableMeta) -> Option<DynamicMethodEntry> {
    let captures = SEARCH_BY.captures(name)?;
    let body = &captures[1];

    for (separator, exclusive) in [("_and_", true), ("_or_", false)] {
        let columns: Vec<&str> = body.split(separator).collect();
        if columns.iter().all(|c| meta.has_searchable_column(c)) {
            return Some(DynamicMethodEntry {
                columns: columns.into_iter().map(String::from).collect(),
                exclusive,
            });
        }
    }

    None
}
