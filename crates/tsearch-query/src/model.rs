//! The public search surface over one table's metadata.
//!
//! A `SearchModel` pairs a `TableMeta` with a search language, a quoting
//! implementation, and the dynamic-method cache. It is the per-class
//! searchable context: construct one per model type and share it.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use tsearch_core::{Error, PgQuoting, Quoting, Result, TableMeta};

use crate::assemble::{assemble, QueryBuilder};
use crate::dynamic::DynamicMethodRegistry;
use crate::fragment::{build_fragments, MatchMode};
use crate::spec::{parse_spec, SearchSpec};

/// Caller-supplied hook applied to each raw term before escaping.
type TermFilter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// What `search` was handed: a keyed specification, or one free-text
/// term to spread across every textual column.
///
/// The coercion of a bare term is an explicit branch here: it forces
/// inclusive (OR) matching regardless of the caller's exclusivity.
#[derive(Debug, Clone)]
pub enum SearchSpecInput {
    Spec(SearchSpec),
    Term(String),
}

impl From<SearchSpec> for SearchSpecInput {
    fn from(spec: SearchSpec) -> Self {
        SearchSpecInput::Spec(spec)
    }
}

impl From<&str> for SearchSpecInput {
    fn from(term: &str) -> Self {
        SearchSpecInput::Term(term.to_string())
    }
}

impl From<String> for SearchSpecInput {
    fn from(term: String) -> Self {
        SearchSpecInput::Term(term)
    }
}

/// Full-text search entry points for one table.
pub struct SearchModel {
    meta: TableMeta,
    language: String,
    quoting: Arc<dyn Quoting>,
    quoted_language: OnceCell<String>,
    dynamic: DynamicMethodRegistry,
    term_filter: Option<TermFilter>,
}

impl SearchModel {
    /// Create a model with PostgreSQL quoting and the `english` search
    /// configuration.
    pub fn new(meta: TableMeta) -> Self {
        Self {
            meta,
            language: "english".to_string(),
            quoting: Arc::new(PgQuoting),
            quoted_language: OnceCell::new(),
            dynamic: DynamicMethodRegistry::new(),
            term_filter: None,
        }
    }

    /// Override the text-search configuration (e.g. `simple`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self.quoted_language = OnceCell::new();
        self
    }

    /// Override the quoting collaborator.
    pub fn with_quoting(mut self, quoting: Arc<dyn Quoting>) -> Self {
        self.quoting = quoting;
        self.quoted_language = OnceCell::new();
        self
    }

    /// Install a hook applied to each raw term before the escaping
    /// normalizer, e.g. for trimming or stop-word stripping.
    pub fn with_term_filter(
        mut self,
        filter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.term_filter = Some(Arc::new(filter));
        self
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    /// The search configuration, literal-quoted once and cached.
    fn quoted_language(&self) -> &str {
        self.quoted_language
            .get_or_init(|| self.quoting.quote_literal(&self.language))
    }

    /// A fresh query over this model's table.
    pub fn base_query(&self) -> QueryBuilder {
        QueryBuilder::new(self.quoting.quote_table(&self.meta.table))
    }

    /// Ranked full-text search with permissive term parsing.
    ///
    /// A bare term (non-spec input) is applied to every textual column
    /// and `exclusive` is forced to `false`: a single free-text term
    /// ORs across all text columns by design.
    pub fn search(&self, input: impl Into<SearchSpecInput>, exclusive: bool) -> QueryBuilder {
        self.search_scoped(self.base_query(), input, exclusive)
    }

    /// Ranked full-text search with operator-aware term parsing
    /// (`&`, `|`, `!`, prefix matches).
    pub fn advanced_search(
        &self,
        input: impl Into<SearchSpecInput>,
        exclusive: bool,
    ) -> QueryBuilder {
        self.advanced_search_scoped(self.base_query(), input, exclusive)
    }

    /// [`search`], augmenting an existing query instead of a fresh one.
    ///
    /// [`search`]: SearchModel::search
    pub fn search_scoped(
        &self,
        query: QueryBuilder,
        input: impl Into<SearchSpecInput>,
        exclusive: bool,
    ) -> QueryBuilder {
        self.run(query, input.into(), exclusive, MatchMode::Plain)
    }

    /// [`advanced_search`], augmenting an existing query.
    ///
    /// [`advanced_search`]: SearchModel::advanced_search
    pub fn advanced_search_scoped(
        &self,
        query: QueryBuilder,
        input: impl Into<SearchSpecInput>,
        exclusive: bool,
    ) -> QueryBuilder {
        self.run(query, input.into(), exclusive, MatchMode::Advanced)
    }

    fn run(
        &self,
        query: QueryBuilder,
        input: SearchSpecInput,
        exclusive: bool,
        mode: MatchMode,
    ) -> QueryBuilder {
        let (spec, exclusive) = self.munge(input, exclusive);
        let spec = match &self.term_filter {
            Some(filter) => spec.map_terms(&**filter),
            None => spec,
        };

        let triples = parse_spec(&spec, &self.meta.table, &*self.quoting);
        debug!(
            table = %self.meta.table,
            triple_count = triples.len(),
            ?mode,
            exclusive,
            "assembling full-text search"
        );
        let fragments = build_fragments(&triples, mode, self.quoted_language());
        assemble(query, &fragments, exclusive, &*self.quoting)
    }

    /// Spread a bare term across all textual columns, forcing inclusive
    /// matching; pass a keyed spec through untouched.
    fn munge(&self, input: SearchSpecInput, exclusive: bool) -> (SearchSpec, bool) {
        match input {
            SearchSpecInput::Spec(spec) => (spec, exclusive),
            SearchSpecInput::Term(term) => {
                let mut spec = SearchSpec::new();
                for column in self.meta.searchable_columns() {
                    spec.insert(column, term.clone());
                }
                (spec, false)
            }
        }
    }

    /// Invoke a dynamic `search_by_<columns>` method.
    ///
    /// Positional terms are consumed in the resolved column order; a
    /// missing term becomes the empty string. Resolution is memoized;
    /// an unrecognized name is `Error::MethodNotFound`.
    pub fn search_by(&self, name: &str, terms: &[&str]) -> Result<QueryBuilder> {
        let entry = self
            .dynamic
            .resolve(name, &self.meta)
            .ok_or_else(|| Error::MethodNotFound(name.to_string()))?;

        let mut spec = SearchSpec::new();
        for (i, column) in entry.columns.iter().enumerate() {
            spec.insert(column.clone(), terms.get(i).copied().unwrap_or(""));
        }
        Ok(self.search(spec, entry.exclusive))
    }

    /// Whether `name` would resolve as a dynamic search method. Never
    /// errors and never mutates the resolution cache.
    pub fn responds_to(&self, name: &str) -> bool {
        DynamicMethodRegistry::responds_to(name, &self.meta)
    }

    /// Whether `name` has a cached resolution (no pattern re-check on
    /// the next call).
    pub fn is_resolved(&self, name: &str) -> bool {
        self.dynamic.is_resolved(name)
    }

    /// Resolve a dynamic method and hand the built query to `exec`.
    ///
    /// Only a statement-level failure (`Error::Database`) from the
    /// executor converts to `MethodNotFound`: a column may have existed
    /// at resolution time and since left the schema, and dynamic
    /// dispatch must answer "no such method" rather than surface the
    /// raw engine error. Every other error passes through unchanged.
    pub fn dispatch<T>(
        &self,
        name: &str,
        terms: &[&str],
        exec: impl FnOnce(QueryBuilder) -> Result<T>,
    ) -> Result<T> {
        let query = self.search_by(name, terms)?;
        match exec(query) {
            Err(Error::Database(error)) => {
                debug!(
                    method_name = name,
                    %error,
                    "statement failure during dynamic dispatch, answering method-not-found"
                );
                Err(Error::MethodNotFound(name.to_string()))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsearch_core::{Column, ColumnType};

    fn book_model() -> SearchModel {
        SearchModel::new(TableMeta::new(
            "books",
            vec![
                Column::new("id", ColumnType::Integer),
                Column::new("title", ColumnType::Text),
                Column::new("body", ColumnType::Text),
            ],
        ))
    }

    #[test]
    fn test_bare_term_spreads_across_text_columns_or_joined() {
        let sql = book_model().search("hello", true).to_sql();

        // Two conditions (title, body), OR-joined despite exclusive = true.
        assert_eq!(sql.matches(" @@ ").count(), 2);
        assert_eq!(sql.matches(" OR ").count(), 1);
        assert!(!sql.contains("::text) AND to_tsvector"));
        // Rank sums exactly two similarity terms.
        assert_eq!(sql.matches("ts_rank(").count(), 2);
        assert_eq!(sql.matches(" + ").count(), 1);
    }

    #[test]
    fn test_spec_input_honors_exclusivity() {
        let model = book_model();
        let spec = SearchSpec::new().term("title", "foo").term("body", "bar");

        let exclusive_sql = model.search(spec.clone(), true).to_sql();
        assert!(exclusive_sql.contains("::text) AND to_tsvector"));

        let inclusive_sql = model.search(spec, false).to_sql();
        assert!(inclusive_sql.contains("::text) OR to_tsvector"));
    }

    #[test]
    fn test_search_uses_plain_parsing() {
        let sql = book_model().search("hello", true).to_sql();
        assert!(sql.contains("plainto_tsquery('english',"));
    }

    #[test]
    fn test_advanced_search_uses_operator_parsing() {
        let spec = SearchSpec::new().term("title", "foo & bar");
        let sql = book_model().advanced_search(spec, true).to_sql();

        assert!(sql.contains(" @@ to_tsquery('english',"));
        assert!(!sql.contains("plainto_tsquery"));
    }

    #[test]
    fn test_with_language_requotes() {
        let spec = SearchSpec::new().term("title", "foo");
        let sql = book_model()
            .with_language("simple")
            .search(spec, true)
            .to_sql();
        assert!(sql.contains("to_tsvector('simple',"));
    }

    #[test]
    fn test_term_filter_runs_before_escaping() {
        let model = book_model().with_term_filter(|t| t.trim().to_string());
        let spec = SearchSpec::new().term("title", "  padded out  ");
        let sql = model.search(spec, true).to_sql();

        // Trimmed first, then escaped: no escaped leading/trailing spaces.
        assert!(sql.contains("'padded\\ out'"));
    }

    #[test]
    fn test_empty_spec_is_noop() {
        let model = book_model();
        let sql = model.search(SearchSpec::new(), true).to_sql();
        assert_eq!(sql, model.base_query().to_sql());
    }

    #[test]
    fn test_search_by_and_builds_exclusive_query() {
        let model = book_model();
        let sql = model
            .search_by("search_by_title_and_body", &["foo", "bar"])
            .unwrap()
            .to_sql();

        assert!(sql.contains("'foo'"));
        assert!(sql.contains("'bar'"));
        assert!(sql.contains("::text) AND to_tsvector"));
    }

    #[test]
    fn test_search_by_or_builds_inclusive_query() {
        let model = book_model();
        let sql = model
            .search_by("search_by_title_or_body", &["foo", "bar"])
            .unwrap()
            .to_sql();

        assert!(sql.contains("::text) OR to_tsvector"));
    }

    #[test]
    fn test_search_by_missing_terms_become_empty() {
        let model = book_model();
        let sql = model
            .search_by("search_by_title_and_body", &["foo"])
            .unwrap()
            .to_sql();
        assert!(sql.contains("''::text"));
    }

    #[test]
    fn test_search_by_unknown_name_is_method_not_found() {
        let model = book_model();
        let err = model
            .search_by("search_by_nonexistent_column", &["foo"])
            .unwrap_err();
        assert!(matches!(err, Error::MethodNotFound(_)));
        assert!(!model.is_resolved("search_by_nonexistent_column"));
    }

    #[test]
    fn test_search_by_memoizes_resolution() {
        let model = book_model();
        assert!(!model.is_resolved("search_by_title"));
        model.search_by("search_by_title", &["foo"]).unwrap();
        assert!(model.is_resolved("search_by_title"));
    }

    #[test]
    fn test_responds_to() {
        let model = book_model();
        assert!(model.responds_to("search_by_title_and_body"));
        assert!(!model.responds_to("search_by_pages"));
        assert!(!model.is_resolved("search_by_title_and_body"));
    }

    #[test]
    fn test_dispatch_converts_database_error_to_method_not_found() {
        let model = book_model();
        let err = model
            .dispatch("search_by_title", &["foo"], |_query| -> Result<()> {
                Err(Error::Database(sqlx::Error::RowNotFound))
            })
            .unwrap_err();
        assert!(matches!(err, Error::MethodNotFound(_)));
    }

    #[test]
    fn test_dispatch_passes_other_errors_through() {
        let model = book_model();
        let err = model
            .dispatch("search_by_title", &["foo"], |_query| -> Result<()> {
                Err(Error::InvalidInput("boom".to_string()))
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_dispatch_returns_executor_value() {
        let model = book_model();
        let sql = model
            .dispatch("search_by_title", &["foo"], |query| Ok(query.to_sql()))
            .unwrap();
        assert!(sql.contains("'foo'"));
    }
}
