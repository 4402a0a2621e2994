//! Query assembly: rank column, combined filter, descending order.
//!
//! `QueryBuilder` is the minimal mutable query surface the record
//! collaborator exposes: selected expressions, boolean filters with an
//! AND/OR combinator, and an ordering. The assembler augments an
//! existing builder without discarding anything already on it.

use rand::Rng;
use tracing::debug;

use tsearch_core::Quoting;

use crate::fragment::FragmentPair;

/// How a filter combines with the filters before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    And,
    Or,
}

/// A lazily rendered `SELECT ... FROM ... WHERE ... ORDER BY ...` query.
///
/// Purely additive: every method appends; nothing already selected or
/// filtered is discarded. Rendering happens only in [`to_sql`].
///
/// [`to_sql`]: QueryBuilder::to_sql
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    table: String,
    selects: Vec<String>,
    filters: Vec<(Combine, String)>,
    order: Option<String>,
}

impl QueryBuilder {
    /// Create a builder over an already-quoted table name.
    pub fn new(quoted_table: impl Into<String>) -> Self {
        Self {
            table: quoted_table.into(),
            selects: Vec::new(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// The quoted primary table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Append a selected expression.
    pub fn select_expr(mut self, expr: impl Into<String>) -> Self {
        self.selects.push(expr.into());
        self
    }

    /// Append a filter, AND-combined with whatever precedes it.
    pub fn filter(mut self, expr: impl Into<String>) -> Self {
        self.filters.push((Combine::And, expr.into()));
        self
    }

    /// Append a filter, OR-combined with whatever precedes it.
    pub fn or_filter(mut self, expr: impl Into<String>) -> Self {
        self.filters.push((Combine::Or, expr.into()));
        self
    }

    /// Replace the ordering expression.
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order = Some(expr.into());
        self
    }

    /// Whether any expression has been explicitly selected.
    pub fn has_selection(&self) -> bool {
        !self.selects.is_empty()
    }

    /// The explicitly selected expressions, in order.
    pub fn selected_exprs(&self) -> &[String] {
        &self.selects
    }

    /// Render the query. Without explicit selections, selects `<table>.*`.
    pub fn to_sql(&self) -> String {
        let select_list = if self.selects.is_empty() {
            format!("{}.*", self.table)
        } else {
            self.selects.join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", select_list, self.table);

        for (i, (combine, expr)) in self.filters.iter().enumerate() {
            if i == 0 {
                sql.push_str(" WHERE ");
            } else {
                sql.push_str(match combine {
                    Combine::And => " AND ",
                    Combine::Or => " OR ",
                });
            }
            sql.push_str(expr);
        }

        if let Some(order) = &self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        sql
    }
}

/// Combine fragment pairs into a ranked, filtered query.
///
/// Augments `query` in place:
/// 1. Without an explicit selection, selects `<table>.*` first.
/// 2. Appends the summed similarity expressions aliased to a fresh rank
///    column.
/// 3. Appends one parenthesized filter joining every condition with
///    `AND` (exclusive) or `OR` (inclusive), so prior filters survive.
/// 4. Orders by the rank alias, descending.
///
/// An empty fragment list is a no-op: the builder is returned unchanged.
pub fn assemble(
    query: QueryBuilder,
    fragments: &[FragmentPair],
    exclusive: bool,
    quoting: &dyn Quoting,
) -> QueryBuilder {
    if fragments.is_empty() {
        debug!(table = %query.table(), "empty fragment list, returning query unchanged");
        return query;
    }

    let alias = rank_alias(&query, quoting);

    let mut query = query;
    if !query.has_selection() {
        let all = format!("{}.*", query.table());
        query = query.select_expr(all);
    }

    let similarities = fragments
        .iter()
        .map(|pair| pair.similarity.as_str())
        .collect::<Vec<_>>()
        .join(" + ");
    query = query.select_expr(format!("{} AS {}", similarities, alias));

    let joiner = if exclusive { " AND " } else { " OR " };
    let conditions = fragments
        .iter()
        .map(|pair| pair.condition.as_str())
        .collect::<Vec<_>>()
        .join(joiner);
    query = query.filter(format!("({})", conditions));

    query.order_by(format!("{} DESC", alias))
}

/// Generate a quoted rank alias not colliding with any selected column.
fn rank_alias(query: &QueryBuilder, quoting: &dyn Quoting) -> String {
    let mut rng = rand::thread_rng();
    rank_alias_with(query, quoting, move || rng.gen_range(0..100_000_000))
}

/// Alias generation over an injectable candidate source.
fn rank_alias_with(
    query: &QueryBuilder,
    quoting: &dyn Quoting,
    mut next_candidate: impl FnMut() -> u32,
) -> String {
    loop {
        let candidate = quoting.quote_identifier(&format!("rank{:08}", next_candidate()));
        let collides = query
            .selected_exprs()
            .iter()
            .any(|expr| expr.contains(&candidate));
        if !collides {
            return candidate;
        }
    }
}
