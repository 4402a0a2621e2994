//! Identifier and literal quoting.
//!
//! Quoting belongs to the connection collaborator, not to the query
//! generator. The `Quoting` trait is that seam; `PgQuoting` is the
//! PostgreSQL implementation used by default.

/// Quoting rules supplied by the connection collaborator.
pub trait Quoting: Send + Sync {
    /// Quote a single identifier (column name, alias).
    fn quote_identifier(&self, name: &str) -> String;

    /// Quote a possibly schema-qualified table name.
    fn quote_table(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a string literal.
    fn quote_literal(&self, value: &str) -> String;
}

/// PostgreSQL quoting: double quotes for identifiers, single quotes for
/// literals, each with embedded-quote doubling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgQuoting;

impl Quoting for PgQuoting {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(PgQuoting.quote_identifier("title"), "\"title\"");
    }

    #[test]
    fn test_quote_identifier_doubles_embedded_quotes() {
        assert_eq!(PgQuoting.quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_table_schema_qualified() {
        assert_eq!(PgQuoting.quote_table("public.books"), "\"public\".\"books\"");
    }

    #[test]
    fn test_quote_table_bare() {
        assert_eq!(PgQuoting.quote_table("books"), "\"books\"");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(PgQuoting.quote_literal("hello"), "'hello'");
    }

    #[test]
    fn test_quote_literal_doubles_embedded_quotes() {
        assert_eq!(PgQuoting.quote_literal("it's"), "'it''s'");
    }
}
